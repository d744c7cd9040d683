//! Seeded generation of hiring candidates and project offers.
//!
//! All randomness in the studio goes through [`CandidateGenerator`], so a
//! fixed seed reproduces the same candidates and offers.

use crate::{
    GenreAffinity, Project, ProjectId, Stage, StaffId, StaffMember, StaffRole, StaffStats,
    StatRequirements,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const GENRES: [&str; 12] = [
    "Rock",
    "Pop",
    "Hip Hop",
    "Electronic",
    "Jazz",
    "Classical",
    "Country",
    "R&B",
    "Metal",
    "Folk",
    "Blues",
    "Reggae",
];

pub const CLIENT_TYPES: [&str; 4] = [
    "Independent Artist",
    "Record Label",
    "Film Studio",
    "Advertising Agency",
];

/// Stage names in production order; offers use a contiguous run of them.
pub const STAGE_NAMES: [&str; 5] = [
    "Pre-Production",
    "Recording",
    "Overdubs",
    "Mixing",
    "Mastering",
];

const FIRST_NAMES: [&str; 12] = [
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Jamie", "Quinn", "Avery", "Blake",
    "Dakota", "Emerson",
];

const LAST_NAMES: [&str; 12] = [
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
    "Hernandez",
    "Lopez",
];

/// Which stat a role leans on, and which comes second.
#[derive(Clone, Copy)]
enum Stat {
    Creativity,
    Technical,
    Speed,
}

fn role_profile(role: StaffRole) -> (Stat, Stat) {
    match role {
        StaffRole::Engineer => (Stat::Technical, Stat::Speed),
        StaffRole::Producer => (Stat::Creativity, Stat::Technical),
        StaffRole::Songwriter => (Stat::Creativity, Stat::Speed),
        StaffRole::MixEngineer => (Stat::Technical, Stat::Creativity),
        StaffRole::MasteringEngineer => (Stat::Technical, Stat::Speed),
        StaffRole::SoundDesigner => (Stat::Creativity, Stat::Technical),
    }
}

/// Counter state that survives a save, so regenerated ids never collide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorCursor {
    pub next_staff: u64,
    pub next_project: u64,
}

/// Deterministic source of staff candidates and project offers.
pub struct CandidateGenerator {
    rng: ChaCha8Rng,
    cursor: GeneratorCursor,
}

impl CandidateGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_cursor(seed, GeneratorCursor::default())
    }

    pub fn with_cursor(seed: u64, cursor: GeneratorCursor) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            cursor,
        }
    }

    pub fn cursor(&self) -> GeneratorCursor {
        self.cursor
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    /// One candidate with role-shaped stats in [0, 100].
    pub fn staff_candidate(&mut self) -> StaffMember {
        self.cursor.next_staff += 1;
        let id = StaffId(format!("staff-{:04}", self.cursor.next_staff));
        let role = StaffRole::ALL[self.rng.gen_range(0..StaffRole::ALL.len())];
        let name = format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES));

        let (primary, secondary) = role_profile(role);
        let mut stats = StaffStats {
            creativity: self.rng.gen_range(10.0..35.0),
            technical: self.rng.gen_range(10.0..35.0),
            speed: self.rng.gen_range(10.0..35.0),
        };
        let primary_value = self.rng.gen_range(60.0..95.0);
        let secondary_value = self.rng.gen_range(40.0..70.0);
        for (stat, value) in [(primary, primary_value), (secondary, secondary_value)] {
            match stat {
                Stat::Creativity => stats.creativity = value,
                Stat::Technical => stats.technical = value,
                Stat::Speed => stats.speed = value,
            }
        }

        let mut member = StaffMember::new(id, name, role, stats);
        member.mood = self.rng.gen_range(50.0..80.0);
        member.salary = Decimal::from(self.rng.gen_range(50u32..=200));
        if self.rng.gen_bool(0.5) {
            member.genre_affinity = Some(GenreAffinity {
                genre: self.pick(&GENRES).to_string(),
                bonus: f32::from(self.rng.gen_range(5u8..=25)),
            });
        }
        member
    }

    pub fn staff_candidates(&mut self, n: usize) -> Vec<StaffMember> {
        (0..n).map(|_| self.staff_candidate()).collect()
    }

    /// One project offer scaled to the player's level.
    pub fn project_offer(&mut self, player_level: u32, initial_efficiency: f32) -> Project {
        self.cursor.next_project += 1;
        let id = ProjectId(format!("project-{:04}", self.cursor.next_project));
        let genre = self.pick(&GENRES).to_string();
        let client_type = self.pick(&CLIENT_TYPES).to_string();
        let max_difficulty = (player_level / 2).clamp(1, 8) + 1;
        let difficulty = self.rng.gen_range(1..=max_difficulty);

        let stage_count = self.rng.gen_range(2..=4usize);
        let first = self.rng.gen_range(0..=STAGE_NAMES.len() - stage_count);
        let stages: Vec<Stage> = STAGE_NAMES[first..first + stage_count]
            .iter()
            .map(|name| {
                let base = (10 + difficulty * self.rng.gen_range(5..=10)) as f32;
                Stage::new(*name, base)
            })
            .collect();

        let requirements = StatRequirements {
            creativity: self
                .rng
                .gen_bool(0.6)
                .then(|| (30 + difficulty * 8).min(100) as f32),
            technical: self
                .rng
                .gen_bool(0.6)
                .then(|| (30 + difficulty * 8).min(100) as f32),
        };

        let payout = 500 * difficulty + self.rng.gen_range(0..=500);
        Project {
            title: format!("{} {} Session", genre, STAGE_NAMES[first]),
            id,
            genre,
            client_id: Some(format!("{}-{}", client_type, self.rng.gen_range(1..=20))),
            client_type,
            difficulty,
            duration_days_total: 5 + difficulty * stage_count as u32 * 2,
            days_elapsed: 0,
            payout_base: Decimal::from(payout),
            rep_gain_base: 5 + difficulty * 5,
            requirements,
            stages,
            current_stage_index: 0,
            quality_score: 0.0,
            efficiency_score: 0.0,
            efficiency_modifier: initial_efficiency,
        }
    }

    pub fn project_offers(
        &mut self,
        n: usize,
        player_level: u32,
        initial_efficiency: f32,
    ) -> Vec<Project> {
        (0..n)
            .map(|_| self.project_offer(player_level, initial_efficiency))
            .collect()
    }
}
