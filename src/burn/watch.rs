use bigdecimal::BigDecimal;
use std::cmp::Ordering;

/// Outcome of comparing a remaining-supply figure with the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplyChange {
    First,
    Unchanged,
    Increased { by: BigDecimal },
    Decreased { by: BigDecimal },
}

/// Tracks remaining supply across consecutive refreshes.
#[derive(Debug, Default)]
pub struct SupplyWatch {
    previous: Option<BigDecimal>,
}

impl SupplyWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> Option<&BigDecimal> {
        self.previous.as_ref()
    }

    /// Record `remaining` and report how it moved since the last observation.
    pub fn observe(&mut self, remaining: &BigDecimal) -> SupplyChange {
        let change = match &self.previous {
            None => SupplyChange::First,
            Some(previous) => match remaining.cmp(previous) {
                Ordering::Equal => SupplyChange::Unchanged,
                Ordering::Greater => SupplyChange::Increased {
                    by: remaining - previous,
                },
                Ordering::Less => {
                    let by = previous - remaining;
                    tracing::warn!(
                        previous = %previous,
                        remaining = %remaining,
                        burned = %by,
                        "Token supply decreased"
                    );
                    SupplyChange::Decreased { by }
                }
            },
        };

        self.previous = Some(remaining.clone());
        change
    }
}
