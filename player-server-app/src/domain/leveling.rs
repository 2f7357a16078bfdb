pub const MIN_EXPERIENCE: i32 = 0;
pub const MAX_EXPERIENCE: i32 = 10_000_000;

pub fn current_level(experience: i32) -> i32 {
    let discriminant = 2500.0 + 200.0 * f64::from(experience);
    ((discriminant.sqrt() - 50.0) / 100.0) as i32
}

pub fn until_next_level(experience: i32, level: i32) -> i32 {
    50 * (level + 1) * (level + 2) - experience
}

/// Experience together with the values derived from it.
/// Can only be built from an experience amount, so `level` and
/// `until_next_level` always agree with `experience`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    experience: i32,
    level: i32,
    until_next_level: i32,
}

impl Progress {
    pub fn from_experience(experience: i32) -> Self {
        let level = current_level(experience);
        Self {
            experience,
            level,
            until_next_level: until_next_level(experience, level),
        }
    }

    pub fn experience(&self) -> i32 {
        self.experience
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn until_next_level(&self) -> i32 {
        self.until_next_level
    }
}
