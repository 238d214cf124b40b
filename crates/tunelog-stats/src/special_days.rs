//! Listening on configured calendar days such as birthdays and holidays.

use crate::aggregator::{AggregationContext, DataAggregator};
use crate::types::SpecialDayActivity;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};
use tunelog_common::{ms_to_minutes, Result};
use tunelog_config::SpecialDay;

/// Plays and minutes per special day, keyed by the day's key.
///
/// Days are matched on local month and day in any year. Days without plays
/// are left out.
#[derive(Debug, Clone)]
pub struct SpecialDaysAggregator {
    /// Days to report on
    pub days: Vec<SpecialDay>,
}

impl SpecialDaysAggregator {
    /// Reports on `days`.
    pub const fn new(days: Vec<SpecialDay>) -> Self {
        Self { days }
    }
}

impl DataAggregator<BTreeMap<String, SpecialDayActivity>> for SpecialDaysAggregator {
    #[instrument(skip(self, ctx), fields(days = self.days.len()))]
    fn aggregate(&self, ctx: &AggregationContext<'_>) -> Result<BTreeMap<String, SpecialDayActivity>> {
        let mut daily: HashMap<(u32, u32), (u64, u64)> = HashMap::new();
        for (event, local) in ctx.iter() {
            let (plays, ms) = daily.entry((local.month(), local.day())).or_default();
            *plays += 1;
            *ms += event.ms_played;
        }

        let result: BTreeMap<String, SpecialDayActivity> = self
            .days
            .iter()
            .filter_map(|day| {
                daily.get(&(day.month, day.day)).map(|&(plays, ms)| {
                    (
                        day.key.clone(),
                        SpecialDayActivity {
                            date: day.label.clone(),
                            plays,
                            minutes: ms_to_minutes(ms),
                        },
                    )
                })
            })
            .collect();

        debug!("{} of {} special days had plays", result.len(), self.days.len());
        Ok(result)
    }
}
