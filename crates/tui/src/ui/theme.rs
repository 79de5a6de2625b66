use api_types::expense::Category;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub surface: Color,
    pub selection: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(170, 170, 170),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(56, 189, 248),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(56, 189, 248),
            surface: Color::Rgb(20, 26, 32),
            selection: Color::Rgb(40, 50, 60),
            positive: Color::Rgb(80, 200, 120),
            negative: Color::Rgb(239, 68, 68),
            error: Color::Rgb(200, 80, 80),
        }
    }
}

impl Theme {
    pub fn category(&self, category: Category) -> Color {
        match category {
            Category::Food => Color::Rgb(16, 185, 129),
            Category::Transport => Color::Rgb(59, 130, 246),
            Category::Utilities => Color::Rgb(245, 158, 11),
            Category::Entertainment => Color::Rgb(168, 85, 247),
            Category::Other => Color::Rgb(100, 116, 139),
        }
    }
}
