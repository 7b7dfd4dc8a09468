//! Colors

pub const SKY: &str = "#46b4c8";
pub const GROUND: &str = "#54a837";
pub const DIRT: &str = "#d2b96e";
pub const PLAYER: &str = "#f5c842";
pub const HUD_TEXT: &str = "#ffffff";
pub const OVERLAY: &str = "rgba(0, 0, 0, 0.45)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
        let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
        Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

const CALM: Rgb = Rgb(51, 179, 128);
const WARM: Rgb = Rgb(255, 179, 51);
const HOT: Rgb = Rgb(255, 51, 51);

/// Obstacle color by scroll speed: teal at the starting speed, red at double
pub fn obstacle_color(speed: f32, base_speed: f32) -> Rgb {
    let t = ((speed - base_speed) / base_speed.max(1.0)).clamp(0.0, 1.0);
    if t < 0.5 {
        Rgb::lerp(CALM, WARM, t / 0.5)
    } else {
        Rgb::lerp(WARM, HOT, (t - 0.5) / 0.5)
    }
}
