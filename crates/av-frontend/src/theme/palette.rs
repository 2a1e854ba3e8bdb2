//! Color palette for the UI theme
//!
//! Panel colors sit close to the viewport background so the diagram stays
//! the brightest thing on screen.

use egui::Color32;

// =============================================================================
// Background hierarchy (dark to light)
// =============================================================================

/// Base background, matches the scene clear color
pub const BG_BASE: Color32 = Color32::from_rgb(26, 26, 26);
/// Panel background
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 35);
/// Elevated surfaces (overlays, popups)
pub const BG_ELEVATED: Color32 = Color32::from_rgb(38, 38, 44);
/// Input field background
pub const BG_INPUT: Color32 = Color32::from_rgb(45, 45, 52);
/// Hover state background
pub const BG_HOVER: Color32 = Color32::from_rgb(55, 55, 65);

// =============================================================================
// Borders
// =============================================================================

/// Subtle panel boundary
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 50, 58);
/// Normal divider line
pub const BORDER_NORMAL: Color32 = Color32::from_rgb(65, 65, 75);

// =============================================================================
// Text hierarchy
// =============================================================================

/// Primary text color
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 230, 235);
/// Secondary text (labels)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 170);

// =============================================================================
// Accent colors
// =============================================================================

/// Primary accent (selection, active)
pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(0, 136, 255);
/// Subtle accent for selection background
pub const ACCENT_SUBTLE: Color32 = Color32::from_rgba_premultiplied(0, 68, 128, 60);

/// Error color
pub const ERROR: Color32 = Color32::from_rgb(255, 90, 90);

// =============================================================================
// Helper functions
// =============================================================================

/// Convert an RGBA `[0, 1]` color, scaling alpha by `opacity`
pub fn rgba(color: [f32; 4], opacity: f32) -> Color32 {
    let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(
        to_u8(color[0]),
        to_u8(color[1]),
        to_u8(color[2]),
        to_u8(color[3] * opacity),
    )
}

/// Create a semi-transparent version of the elevated background for overlays
pub fn overlay_bg(alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(BG_ELEVATED.r(), BG_ELEVATED.g(), BG_ELEVATED.b(), alpha)
}
