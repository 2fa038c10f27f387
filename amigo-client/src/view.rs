use amigo_api::types::BudgetTier;
use amigo_chat::RenderBlock;

/// Terminal line width own messages are right-aligned against.
const LINE_WIDTH: usize = 72;

fn budget_label(tier: Option<BudgetTier>) -> &'static str {
    match tier {
        Some(BudgetTier::Budget) => "budget",
        Some(BudgetTier::MidRange) => "mid-range",
        Some(BudgetTier::Luxury) => "luxury",
        None => "unrated",
    }
}

/// Format one render block as terminal text. Pure layout; every
/// classification decision already happened in the dispatcher.
pub fn format_block(block: &RenderBlock) -> String {
    match block {
        RenderBlock::OwnMessage {
            text,
            time,
            pending,
        } => {
            let marker = if *pending { " …" } else { "" };
            let line = format!("{} [{}]{}", text, time, marker);
            format!("{:>width$}", line, width = LINE_WIDTH)
        }
        RenderBlock::PeerMessage { author, text, time } => {
            format!("{} [{}]: {}", author, time, text)
        }
        RenderBlock::DestinationCarousel {
            author,
            candidates,
            summary,
            ..
        } => {
            let mut lines = vec![format!(
                "{} suggests {} destination{}:",
                author,
                candidates.len(),
                if candidates.len() == 1 { "" } else { "s" }
            )];
            if let Some(summary) = summary {
                if !summary.preferred_places.is_empty() {
                    lines.push(format!(
                        "  group wants: {}",
                        summary.preferred_places.join(", ")
                    ));
                }
            }
            for (i, candidate) in candidates.iter().enumerate() {
                lines.push(format!(
                    "  {}. {} ({})",
                    i + 1,
                    candidate.place_name,
                    budget_label(candidate.budget)
                ));
                if !candidate.best_time.is_empty() {
                    lines.push(format!("     best time: {}", candidate.best_time.join(", ")));
                }
                for reason in &candidate.why_it_matches {
                    lines.push(format!("     - {}", reason));
                }
            }
            lines.join("\n")
        }
        RenderBlock::ConsensusCard { author, card } => {
            let mut lines = vec![
                format!("{} — consensus reached: {}", author, card.trip_title),
                format!("  {} ({})", card.dates.range, card.dates.duration),
                format!("  per person: {}", card.cost_estimate.per_person),
                format!(
                    "  flight {} / stay {} / local transport {}",
                    card.cost_estimate.breakdown.flight,
                    card.cost_estimate.breakdown.stay,
                    card.cost_estimate.breakdown.local_transport
                ),
            ];
            for experience in &card.experiences {
                lines.push(format!("  * {}", experience.title));
            }
            lines.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amigo_api::types::{ConsensusCandidate, ConsensusCard};

    #[test]
    fn test_own_message_is_right_aligned() {
        let block = RenderBlock::OwnMessage {
            text: "Hello".to_string(),
            time: "10:05".to_string(),
            pending: false,
        };
        let line = format_block(&block);
        assert_eq!(line.len(), LINE_WIDTH);
        assert!(line.starts_with(' '));
        assert!(line.ends_with("Hello [10:05]"));
    }

    #[test]
    fn test_pending_own_message_is_marked() {
        let block = RenderBlock::OwnMessage {
            text: "Hello".to_string(),
            time: "10:05".to_string(),
            pending: true,
        };
        assert!(format_block(&block).ends_with("…"));
    }

    #[test]
    fn test_peer_message_is_left_aligned() {
        let block = RenderBlock::PeerMessage {
            author: "ravi".to_string(),
            text: "Flights look cheap".to_string(),
            time: "10:02".to_string(),
        };
        assert_eq!(format_block(&block), "ravi [10:02]: Flights look cheap");
    }

    #[test]
    fn test_carousel_lists_candidates() {
        let block = RenderBlock::DestinationCarousel {
            author: "TripBot".to_string(),
            status: None,
            summary: None,
            candidates: vec![ConsensusCandidate {
                place_name: "Bali".to_string(),
                image_url: String::new(),
                budget: Some(BudgetTier::MidRange),
                best_time: vec!["November".to_string()],
                why_it_matches: vec!["beaches".to_string()],
            }],
        };
        let text = format_block(&block);
        assert!(text.contains("TripBot suggests 1 destination:"));
        assert!(text.contains("1. Bali (mid-range)"));
        assert!(text.contains("best time: November"));
        assert!(text.contains("- beaches"));
    }

    #[test]
    fn test_card_shows_costs() {
        let card: ConsensusCard = serde_json::from_value(serde_json::json!({
            "tripTitle": "Bali Long Weekend",
            "dates": {"from": "Nov 14", "to": "Nov 18", "duration": "5 days", "range": "Nov 14 - 18"},
            "experiences": [{"title": "Ubud rice terraces"}],
            "costEstimate": {
                "perPerson": "₹35,000",
                "breakdown": {"flight": "₹18,500", "stay": "₹12,600", "localTransport": "₹3,900"}
            }
        }))
        .unwrap();
        let text = format_block(&RenderBlock::ConsensusCard {
            author: "TripBot".to_string(),
            card,
        });
        assert!(text.contains("consensus reached: Bali Long Weekend"));
        assert!(text.contains("per person: ₹35,000"));
        assert!(text.contains("* Ubud rice terraces"));
    }
}
