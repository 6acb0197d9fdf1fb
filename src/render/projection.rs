use crate::backend::AnalysisResult;
use crate::session::{Role, Transcript};

/// Everything the display shows at one moment
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub transcript: &'a Transcript,
    /// Emotion label of the latest reply, as the backend sent it
    pub emotion: Option<&'a str>,
    pub analysis: Option<&'a AnalysisResult>,
}

/// Render a view to display text
///
/// Deterministic and rebuilt from scratch each time: the transcript, then
/// the latest reply with its emotion, then the analysis if there is one.
pub fn project(view: &View<'_>) -> String {
    let mut sections = Vec::new();

    if !view.transcript.is_empty() {
        let lines: Vec<String> = view
            .transcript
            .iter()
            .map(|u| format!("{}: {}", u.role().label(), u.text()))
            .collect();
        sections.push(lines.join("\n"));
    }

    let latest_reply = view
        .transcript
        .iter()
        .rev()
        .find(|u| u.role() == Role::Bot);
    if let Some(reply) = latest_reply {
        let mut block = reply.text().to_string();
        if let Some(emotion) = view.emotion {
            block.push_str(&format!("\nEmoción detectada: {emotion}"));
        }
        sections.push(block);
    }

    if let Some(analysis) = view.analysis {
        sections.push(format_analysis(analysis));
    }

    sections.join("\n\n")
}

/// Emotion and cost panels for an analysis result
pub fn format_analysis(analysis: &AnalysisResult) -> String {
    format!(
        "Emoción Dominante: {}\nSentimiento: {}\nIndicador de Negociación: {}%\nTokens Usados: {}\nCosto Estimado: ${}",
        analysis.dominant_emotion,
        analysis.sentiment,
        analysis.negotiation_score,
        analysis.tokens_used,
        analysis.estimated_cost
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Utterance;

    fn sample_transcript() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push(Utterance::user("hola"));
        transcript.push(Utterance::bot("Hola amigo"));
        transcript
    }

    #[test]
    fn test_empty_view_renders_nothing() {
        let transcript = Transcript::new();
        let view = View {
            transcript: &transcript,
            emotion: None,
            analysis: None,
        };
        assert_eq!(project(&view), "");
    }

    #[test]
    fn test_reply_block_includes_emotion() {
        let transcript = sample_transcript();
        let view = View {
            transcript: &transcript,
            emotion: Some("alegría"),
            analysis: None,
        };
        assert_eq!(
            project(&view),
            "Usuario: hola\nBot: Hola amigo\n\nHola amigo\nEmoción detectada: alegría"
        );
    }

    #[test]
    fn test_analysis_panel() {
        let transcript = sample_transcript();
        let analysis = AnalysisResult {
            dominant_emotion: "alegría".to_string(),
            sentiment: "positivo".to_string(),
            negotiation_score: 80.0,
            tokens_used: 120,
            estimated_cost: 0.0024,
        };
        let view = View {
            transcript: &transcript,
            emotion: None,
            analysis: Some(&analysis),
        };

        let rendered = project(&view);
        assert!(rendered.ends_with(
            "Emoción Dominante: alegría\nSentimiento: positivo\nIndicador de Negociación: 80%\nTokens Usados: 120\nCosto Estimado: $0.0024"
        ));
        assert_eq!(rendered, project(&view));
    }
}
