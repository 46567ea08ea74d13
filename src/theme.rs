use eframe::egui::Color32;

// Buttons
pub const PRIMARY_BUTTON_BG: Color32 = Color32::from_rgb(76, 154, 255); // Vibrant blue for primary actions
pub const STOP_BUTTON_BG: Color32 = Color32::from_rgb(214, 69, 65);
pub const BUTTON_MAIN_TEXT: Color32 = Color32::from_rgb(255, 255, 255);
pub const BORDER_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 67, 15); // Subtle border

// Log panel
pub const LOG_BG: Color32 = Color32::from_rgb(248, 248, 248);
pub const LOG_TEXT: Color32 = Color32::from_rgb(36, 36, 36);
pub const LOG_COMMAND_TEXT: Color32 = Color32::from_rgb(90, 90, 160);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(200, 0, 0);
pub const TEXT_SUCCESS: Color32 = Color32::from_rgb(0, 140, 0);

// Sizing & Spacing
pub const ROUNDING_FRAME: f32 = 4.0;
pub const ROUNDING_BUTTON: f32 = 6.0;
pub const MIN_SIZE_BUTTON: egui::Vec2 = egui::Vec2::new(140.0, 36.0);
pub const BUTTON_FONT_SIZE: f32 = 15.0;
pub const LOG_FONT_SIZE: f32 = 12.5;

pub const WINDOW_SIZE: [f32; 2] = [760.0, 520.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [560.0, 420.0];
