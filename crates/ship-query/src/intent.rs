//! Question routing.

/// What a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    DeliveryToday,
    /// Total count, or delayed/pending analysis when the question mentions either.
    ShipmentCount,
    CarrierLeader,
    StatusDistribution,
    Weight,
    Cost,
    Priority,
    Origin,
    Destination,
}

/// Keyword predicates in evaluation order; the first intent with a keyword
/// contained in the lowercased question wins.
///
/// Specific phrases come before general ones: "scheduled for delivery today"
/// must not fall through to the shipment count, and "average weight" must
/// not be taken by the cost phrase "what is the average".
pub const DISPATCH: &[(Intent, &[&str])] = &[
    (
        Intent::DeliveryToday,
        &[
            "delivery today",
            "scheduled for delivery today",
            "delivering today",
            "scheduled today",
            "today delivery",
        ],
    ),
    (
        Intent::ShipmentCount,
        &["total number", "how many shipments", "total shipments"],
    ),
    (
        Intent::CarrierLeader,
        &[
            "carrier has most",
            "carrier with most",
            "carrier has the most",
            "carrier with the most",
            "top carrier",
        ],
    ),
    (
        Intent::StatusDistribution,
        &[
            "status distribution",
            "breakdown",
            "status breakdown",
            "distribution of shipment statuses",
            "distribution of status",
            "what is the distribution",
            "shipment statuses",
        ],
    ),
    (Intent::Weight, &["weight"]),
    (
        Intent::Cost,
        &[
            "average cost",
            "total cost",
            "cost analysis",
            "shipping cost",
            "average shipping cost",
            "what is the average",
        ],
    ),
    (
        Intent::Priority,
        &["priority", "high priority", "high-priority", "are there any high"],
    ),
    (Intent::Origin, &["origins", "origin", "outgoing"]),
    (Intent::Destination, &["destination", "popular destination"]),
];

/// Selects the intent of `question`, or `None` if no keyword matches.
pub fn route(question: &str) -> Option<Intent> {
    let lowered = question.to_lowercase();
    DISPATCH
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(intent, _)| *intent)
}

/// True when a count question asks about delayed or pending shipments.
pub fn mentions_delayed_or_pending(question: &str) -> bool {
    let lowered = question.to_lowercase();
    lowered.contains("delayed") || lowered.contains("pending")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_questions_route() {
        let cases = [
            ("What is the total number of shipments?", Intent::ShipmentCount),
            ("Which carrier has the most shipments?", Intent::CarrierLeader),
            ("How many shipments are delayed or pending?", Intent::ShipmentCount),
            ("What is the total weight of all shipments?", Intent::Weight),
            ("Which destinations appear most frequently?", Intent::Destination),
            ("What is the average shipping cost?", Intent::Cost),
            ("Are there any high-priority shipments?", Intent::Priority),
            ("Which shipments are scheduled for delivery today?", Intent::DeliveryToday),
            ("What is the distribution of shipment statuses?", Intent::StatusDistribution),
            ("Which origins have the most outgoing shipments?", Intent::Origin),
        ];
        for (question, expected) in cases {
            assert_eq!(route(question), Some(expected), "{question}");
        }
    }

    #[test]
    fn test_delivery_today_beats_total() {
        assert_eq!(
            route("How many shipments are scheduled for delivery today?"),
            Some(Intent::DeliveryToday)
        );
    }

    #[test]
    fn test_total_cost_is_cost() {
        assert_eq!(route("What is the total cost?"), Some(Intent::Cost));
        assert_eq!(route("What is the total shipping cost?"), Some(Intent::Cost));
    }

    #[test]
    fn test_average_weight_is_weight() {
        assert_eq!(route("What is the average weight?"), Some(Intent::Weight));
    }

    #[test]
    fn test_unmatched_question() {
        assert_eq!(route("Summarize the risks in this manifest"), None);
    }

    #[test]
    fn test_mentions_delayed_or_pending() {
        assert!(mentions_delayed_or_pending("How many shipments are DELAYED?"));
        assert!(!mentions_delayed_or_pending("How many shipments?"));
    }
}
