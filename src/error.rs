//! Errors raised by the outer shell: configuration, terminal and log setup.
//! The game rules themselves never fail.

/// Everything that can go wrong before or around the game loop.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal, config file or log file I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML config
    #[error("config parse error in {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// The terminal cannot fit the border, HUD and a usable play area
    #[error("terminal too small: {cols}x{rows} (need at least {min_cols}x{min_rows})")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
