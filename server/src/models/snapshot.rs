use serde::Serialize;

/// Point-in-time fundraising progress as served to the widget.
///
/// Built fresh for every request and never mutated afterwards. A snapshot is
/// either fully derived from the campaign page or it is [`FALLBACK`]; the two
/// are never mixed.
///
/// [`FALLBACK`]: FundraisingSnapshot::FALLBACK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FundraisingSnapshot {
    pub raised: u64,
    pub goal: u64,
    pub percentage: u64,
}

impl FundraisingSnapshot {
    /// Shipped with the service and returned whenever live derivation fails.
    pub const FALLBACK: FundraisingSnapshot = FundraisingSnapshot {
        raised: 1631,
        goal: 1800,
        percentage: 91,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_serializes_to_widget_shape() {
        let json = serde_json::to_value(FundraisingSnapshot::FALLBACK).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "raised": 1631, "goal": 1800, "percentage": 91 })
        );
    }

    #[test]
    fn test_fallback_is_internally_consistent() {
        let fallback = FundraisingSnapshot::FALLBACK;
        let computed = (fallback.raised as f64 / fallback.goal as f64 * 100.0).round() as u64;
        assert_eq!(computed, fallback.percentage);
    }
}
