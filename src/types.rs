//! Common game vocabulary used by every layer
//! Plain data and constants only, so any module can depend on this one

/// Default board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// Gravity timing (milliseconds)
pub const BASE_DROP_MS: u64 = 800;
pub const LEVEL_STEP_MS: u64 = 70;
pub const DROP_FLOOR_MS: u64 = 120;
pub const FAST_DROP_MS: u64 = 50;

/// Points for clearing 0..=4 rows with one lock
pub const LINE_POINTS: [u32; 5] = [0, 100, 300, 600, 1000];

/// Cleared rows required to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Tetromino shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    Z,
    S,
}

impl ShapeKind {
    /// All shapes, in draw order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::Z,
        ShapeKind::S,
    ];

    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "z" => Some(ShapeKind::Z),
            "s" => Some(ShapeKind::S),
            _ => None,
        }
    }

    /// Single-letter name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::L => "L",
            ShapeKind::J => "J",
            ShapeKind::Z => "Z",
            ShapeKind::S => "S",
        }
    }

    /// Display colour name stored in board cells on the wire
    pub fn color_name(&self) -> &'static str {
        match self {
            ShapeKind::I => "cyan",
            ShapeKind::O => "yellow",
            ShapeKind::T => "purple",
            ShapeKind::L => "orange",
            ShapeKind::J => "blue",
            ShapeKind::Z => "green",
            ShapeKind::S => "red",
        }
    }

    /// Map a colour name back to its shape
    pub fn from_color_name(name: &str) -> Option<Self> {
        match name {
            "cyan" => Some(ShapeKind::I),
            "yellow" => Some(ShapeKind::O),
            "purple" => Some(ShapeKind::T),
            "orange" => Some(ShapeKind::L),
            "blue" => Some(ShapeKind::J),
            "green" => Some(ShapeKind::Z),
            "red" => Some(ShapeKind::S),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = filled with shape kind)
pub type Cell = Option<ShapeKind>;

/// Player commands accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    MoveDown,
    FastDrop(bool),
}

impl Command {
    /// Parse command from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "moveLeft" => Some(Command::MoveLeft),
            "moveRight" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "moveDown" => Some(Command::MoveDown),
            "fastDropOn" => Some(Command::FastDrop(true)),
            "fastDropOff" => Some(Command::FastDrop(false)),
            _ => None,
        }
    }

    /// Canonical string name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::MoveDown => "moveDown",
            Command::FastDrop(true) => "fastDropOn",
            Command::FastDrop(false) => "fastDropOff",
        }
    }
}

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    Running,
    GameOver,
}

/// How assisted moves are carried out.
///
/// `Stepped` issues one command per tick once the piece has entered the
/// visible area, so assisted play animates like a fast human. `Immediate`
/// snaps the piece to its target as soon as the advice arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePacing {
    Stepped,
    Immediate,
}

/// Per-session settings
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub start_level: u32,
    pub pacing: MovePacing,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            start_level: 1,
            pacing: MovePacing::Stepped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_kind_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(ShapeKind::from_color_name(kind.color_name()), Some(kind));
        }
    }

    #[test]
    fn test_shape_kind_from_str_case_insensitive() {
        assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
        assert_eq!(ShapeKind::from_str("Z"), Some(ShapeKind::Z));
        assert_eq!(ShapeKind::from_str("x"), None);
    }

    #[test]
    fn test_command_round_trip() {
        let commands = [
            Command::MoveLeft,
            Command::MoveRight,
            Command::Rotate,
            Command::MoveDown,
            Command::FastDrop(true),
            Command::FastDrop(false),
        ];
        for cmd in commands {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
        assert_eq!(Command::from_str("hold"), None);
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, BOARD_WIDTH);
        assert_eq!(config.height, BOARD_HEIGHT);
        assert_eq!(config.start_level, 1);
        assert_eq!(config.pacing, MovePacing::Stepped);
    }
}
