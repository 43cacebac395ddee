// Reflexbox — Game Events & Data Types

// ---------------------------------------------------------------------------
// Player moves
// ---------------------------------------------------------------------------

/// One of the four actions the player can produce. Also serves as the prompt
/// label: each variant carries the text shown when it is the active prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Twist,
    Push,
    Forward,
    Backward,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Twist, Move::Push, Move::Forward, Move::Backward];

    /// Prompt text displayed when this move is requested.
    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::Twist    => "Twist it!",
            Self::Push     => "Push it!",
            Self::Forward  => "Forward!",
            Self::Backward => "Backward!",
        }
    }
}

// ---------------------------------------------------------------------------
// Round outcome
// ---------------------------------------------------------------------------

/// Terminal value of one round. `Matched` continues the session; the other
/// two end it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Matched,
    Mismatched(Move),
    TimedOut,
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy   => "Easy",
            Self::Medium => "Medium",
            Self::Hard   => "Hard",
        }
    }

    /// Per-round response window.
    pub fn timeout_ms(self) -> u64 {
        match self {
            Self::Easy   => 20_000,
            Self::Medium => 10_000,
            Self::Hard   => 5_000,
        }
    }
}
