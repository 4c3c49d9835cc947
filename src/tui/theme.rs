use ratatui::style::Color;

// Accent colors
pub const ACCENT_CORAL: Color = Color::Rgb(232, 131, 136);     // #E88388
pub const ACCENT_LIGHT_BLUE: Color = Color::Rgb(124, 175, 194); // #7CAFC2
pub const ACCENT_MINT: Color = Color::Rgb(161, 193, 129);       // #A1C181

// UI colors
pub const TEXT_DIM: Color = Color::Rgb(136, 136, 136);        // #888888
pub const TEXT_WHITE: Color = Color::Rgb(255, 255, 255);      // #FFFFFF
pub const TEXT_DARK: Color = Color::Rgb(17, 24, 39);          // #111827

// Select colors
pub const CHIP_BG: Color = Color::Rgb(55, 65, 81);            // #374151
pub const SELECTED_BG: Color = Color::Rgb(147, 197, 253);     // #93C5FD
pub const HIGHLIGHT_BG: Color = Color::Rgb(59, 130, 246);     // #3B82F6
pub const POPUP_BG: Color = Color::Black;
