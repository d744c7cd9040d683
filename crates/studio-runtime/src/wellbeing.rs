//! Daily mood, burnout and training updates for hired staff.

use serde::{Deserialize, Serialize};
use studio_core::{BalanceConfig, StaffId, StaffMember, StaffStatus, TrainingFocus, ATTRIBUTE_MAX};
use tracing::{info, warn};

const MOOD_CEILING_NEUTRAL: f32 = 55.0;
const MOOD_FLOOR_NEUTRAL: f32 = 45.0;
const MOOD_DRIFT: f32 = 0.5;
const STRESSED_MOOD: f32 = 25.0;
const CONTENT_MOOD: f32 = 60.0;
const STRESS_BURNOUT: f32 = 2.0;
const CONTENT_RECOVERY: f32 = 1.0;
const NATURAL_RECOVERY: f32 = 0.5;
const REST_RECOVERY: f32 = 5.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WellbeingEvent {
    TrainingFinished {
        staff_id: StaffId,
        focus: TrainingFocus,
        new_value: f32,
    },
    /// Burnout crossed the critical threshold today.
    BurnoutCritical { staff_id: StaffId, burnout: f32 },
}

pub fn daily_update(s: &mut StaffMember, cfg: &BalanceConfig) -> Vec<WellbeingEvent> {
    let mut events = Vec::new();
    if let Some(event) = progress_training(s, cfg) {
        events.push(event);
    }

    if s.mood > MOOD_CEILING_NEUTRAL {
        s.mood = (s.mood - MOOD_DRIFT).max(MOOD_CEILING_NEUTRAL);
    } else if s.mood < MOOD_FLOOR_NEUTRAL {
        s.mood = (s.mood + MOOD_DRIFT).min(MOOD_FLOOR_NEUTRAL);
    }

    let before = s.burnout;
    let mut delta = -NATURAL_RECOVERY;
    if s.mood < STRESSED_MOOD {
        delta += STRESS_BURNOUT;
    } else if s.mood > CONTENT_MOOD {
        delta -= CONTENT_RECOVERY;
    }
    if s.status == StaffStatus::Resting {
        delta -= REST_RECOVERY;
    }
    s.burnout = (s.burnout + delta).clamp(0.0, ATTRIBUTE_MAX);
    if before < cfg.burnout_critical && s.burnout >= cfg.burnout_critical {
        warn!(staff = %s.id, burnout = s.burnout, "staff burnout critical");
        events.push(WellbeingEvent::BurnoutCritical {
            staff_id: s.id.clone(),
            burnout: s.burnout,
        });
    }
    events
}

fn progress_training(s: &mut StaffMember, cfg: &BalanceConfig) -> Option<WellbeingEvent> {
    if s.status != StaffStatus::Training {
        return None;
    }
    let Some(training) = s.training.as_mut() else {
        s.status = StaffStatus::Idle;
        return None;
    };
    training.days_remaining = training.days_remaining.saturating_sub(1);
    if training.days_remaining > 0 {
        return None;
    }
    let focus = training.focus;
    s.training = None;
    s.status = StaffStatus::Idle;
    let stat = s.stat_mut(focus);
    *stat = (*stat + cfg.training_stat_gain).min(ATTRIBUTE_MAX);
    let new_value = *stat;
    info!(staff = %s.id, ?focus, new_value, "training finished");
    Some(WellbeingEvent::TrainingFinished {
        staff_id: s.id.clone(),
        focus,
        new_value,
    })
}
