//! Banner and gallows frames, one frame per miss count.

use crate::engine::MAX_TRIES;

const BANNER: &str = r"Welcome to the game Hangman:
 _    _
| |  | |
| |__| | __ _ _ __   __ _ _ __ ___   __ _ _ __
|  __  |/ _` | '_ \ / _` | '_ ` _ \ / _` | '_ \
| |  | | (_| | | | | (_| | | | | | | (_| | | | |
|_|  |_|\__,_|_| |_|\__, |_| |_| |_|\__,_|_| |_|
                     __/ |
                    |___/";

const FRAMES: [&str; MAX_TRIES as usize + 1] = [
    "x-------x",
    "x-------x\n|\n|\n|\n|\n|",
    "x-------x\n|       |\n|       0\n|\n|\n|",
    "x-------x\n|       |\n|       0\n|       |\n|\n|",
    "x-------x\n|       |\n|       0\n|      /|\\\n|\n|",
    "x-------x\n|       |\n|       0\n|      /|\\\n|      /\n|",
    "x-------x\n|       |\n|       0\n|      /|\\\n|      / \\\n|",
];

/// Immutable art tables handed to presenters at startup.
#[derive(Debug, Clone, Copy)]
pub struct Artwork {
    pub banner: &'static str,
    pub frames: [&'static str; MAX_TRIES as usize + 1],
}

impl Artwork {
    pub const CLASSIC: Self = Self {
        banner: BANNER,
        frames: FRAMES,
    };

    /// Frame for `attempts` misses; counts past the table use the last frame.
    #[must_use]
    pub fn frame(&self, attempts: u8) -> &'static str {
        let index = usize::from(attempts).min(self.frames.len() - 1);
        self.frames[index]
    }
}

impl Default for Artwork {
    fn default() -> Self {
        Self::CLASSIC
    }
}
