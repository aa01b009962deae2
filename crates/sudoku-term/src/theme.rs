use crossterm::style::Color;

/// Color theme for the terminal UI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Grid frame color
    pub frame: Color,
    /// Given (puzzle) cell color
    pub given: Color,
    /// Player-entered value color
    pub entry: Color,
    /// Error/conflict value color
    pub error: Color,
    /// Cursor cell background
    pub cursor_bg: Color,
    /// Same row/col/box background
    pub peer_bg: Color,
    /// Cells conflicting with the cursor's value
    pub conflict_bg: Color,
    /// Status and helper text
    pub info: Color,
    /// Key binding hints
    pub key: Color,
    /// Completion banner
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            frame: Color::Rgb { r: 95, g: 100, b: 120 },
            given: Color::Rgb { r: 235, g: 235, b: 245 },
            entry: Color::Rgb { r: 95, g: 175, b: 255 },
            error: Color::Rgb { r: 255, g: 95, b: 95 },
            cursor_bg: Color::Rgb { r: 75, g: 95, b: 150 },
            peer_bg: Color::Rgb { r: 38, g: 42, b: 58 },
            conflict_bg: Color::Rgb { r: 105, g: 40, b: 40 },
            info: Color::Rgb { r: 150, g: 155, b: 175 },
            key: Color::Rgb { r: 255, g: 205, b: 95 },
            success: Color::Rgb { r: 95, g: 235, b: 130 },
        }
    }

    pub fn light() -> Self {
        Self {
            frame: Color::Rgb { r: 160, g: 160, b: 175 },
            given: Color::Rgb { r: 20, g: 20, b: 30 },
            entry: Color::Rgb { r: 25, g: 95, b: 190 },
            error: Color::Rgb { r: 210, g: 45, b: 45 },
            cursor_bg: Color::Rgb { r: 175, g: 195, b: 250 },
            peer_bg: Color::Rgb { r: 228, g: 230, b: 240 },
            conflict_bg: Color::Rgb { r: 245, g: 185, b: 185 },
            info: Color::Rgb { r: 95, g: 95, b: 115 },
            key: Color::Rgb { r: 190, g: 115, b: 20 },
            success: Color::Rgb { r: 35, g: 150, b: 60 },
        }
    }
}
