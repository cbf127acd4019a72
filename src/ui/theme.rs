use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub operator: Color,
    pub number: Color,
    pub boolean: Color,
    pub identifier: Color,
    pub border_focused: Color,
    pub status_bg: Color,
    pub disabled: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),        // Mauve for keywords
    operator: Color::Rgb(137, 180, 250),       // Blue for operators and delimiters
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    boolean: Color::Rgb(245, 194, 231),        // Pink for true/false
    identifier: Color::Rgb(205, 214, 244),     // Plain text
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    status_bg: Color::Rgb(50, 50, 70),
    disabled: Color::Rgb(69, 71, 90),
};
