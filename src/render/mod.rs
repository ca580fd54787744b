//! Pixel-to-ASCII rendering
//!
//! Pure, deterministic transforms: no state, no suspension points.

use crate::engine::{FrameBuffer, GameState};

/// Palette ordered darkest to lightest
pub const SHADE_CHARS: &[u8] = b" .:-=+*#%@";

const HEALTH_BAR_CELLS: usize = 10;

/// Convert a grayscale frame to an ASCII block of the given dimensions
///
/// Nearest-neighbor sampling onto the target grid, each luminance mapped
/// onto the palette. Rows are joined with `\n`.
pub fn render(frame: &FrameBuffer, target_width: usize, target_height: usize) -> String {
    if target_width == 0 || target_height == 0 || frame.width == 0 || frame.height == 0 {
        return String::new();
    }

    let mut out = String::with_capacity((target_width + 1) * target_height);
    for row in 0..target_height {
        if row > 0 {
            out.push('\n');
        }
        let src_y = row * frame.height / target_height;
        for col in 0..target_width {
            let src_x = col * frame.width / target_width;
            let luminance = frame.pixel(src_x, src_y) as usize;
            let index = luminance * (SHADE_CHARS.len() - 1) / 255;
            out.push(SHADE_CHARS[index] as char);
        }
    }
    out
}

/// Frame the ASCII block and append a centered status line
///
/// Layout:
/// ```text
/// ╔══════╗
/// <frame>
/// ╚══════╝
///  Health: [██████░░░░] 60% | Ammo: 24 | Armor: 10 | Weapon: Shotgun
/// ```
pub fn compose_overlay(ascii_frame: &str, state: &GameState) -> String {
    let width = ascii_frame
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let status = format!(
        "Health: [{}] {}% | Ammo: {} | Armor: {} | Weapon: {}",
        health_bar(state.health),
        state.health,
        state.ammo,
        state.armor,
        weapon_name(state.weapon),
    );

    let border_top: String = std::iter::once('╔')
        .chain(std::iter::repeat('═').take(width))
        .chain(std::iter::once('╗'))
        .collect();
    let border_bottom: String = std::iter::once('╚')
        .chain(std::iter::repeat('═').take(width))
        .chain(std::iter::once('╝'))
        .collect();

    format!(
        "{border_top}\n{ascii_frame}\n{border_bottom}\n{}",
        center(&status, width)
    )
}

/// Weapon id to display name; ids outside the table render as "Unknown"
pub fn weapon_name(weapon_id: u8) -> &'static str {
    match weapon_id {
        1 => "Fist",
        2 => "Pistol",
        3 => "Shotgun",
        4 => "Chaingun",
        5 => "Rocket",
        6 => "Plasma",
        7 => "BFG9000",
        _ => "Unknown",
    }
}

fn health_bar(health: i32) -> String {
    let filled = (health.clamp(0, 100) as usize * HEALTH_BAR_CELLS) / 100;
    let mut bar = String::with_capacity(HEALTH_BAR_CELLS * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..HEALTH_BAR_CELLS {
        bar.push('░');
    }
    bar
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = (width - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame() -> FrameBuffer {
        let mut frame = FrameBuffer::blank(4, 2);
        frame.pixels = vec![0, 64, 128, 255, 255, 128, 64, 0];
        frame
    }

    #[test]
    fn render_maps_palette_ends() {
        let out = render(&gradient_frame(), 4, 2);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with(' ')); // darkest
        assert!(rows[0].ends_with('@')); // lightest
        assert!(rows[1].starts_with('@'));
        assert!(rows[1].ends_with(' '));
    }

    #[test]
    fn render_is_deterministic() {
        let frame = gradient_frame();
        assert_eq!(render(&frame, 3, 2), render(&frame, 3, 2));
    }

    #[test]
    fn render_zero_target_is_empty() {
        assert_eq!(render(&gradient_frame(), 0, 5), "");
        assert_eq!(render(&gradient_frame(), 5, 0), "");
    }

    #[test]
    fn render_downsamples_to_target_grid() {
        let out = render(&gradient_frame(), 2, 1);
        assert_eq!(out.lines().count(), 1);
        assert_eq!(out.chars().count(), 2);
    }

    #[test]
    fn overlay_contains_status_fields() {
        let state = GameState {
            health: 60,
            armor: 10,
            ammo: 24,
            weapon: 3,
            ..GameState::default()
        };
        let out = compose_overlay("####\n####", &state);

        assert!(out.starts_with("╔════╗\n"));
        assert!(out.contains("╚════╝\n"));
        assert!(out.contains("60%"));
        assert!(out.contains("Ammo: 24"));
        assert!(out.contains("Armor: 10"));
        assert!(out.contains("Weapon: Shotgun"));
        assert!(out.contains("██████░░░░"));
    }

    #[test]
    fn overlay_unknown_weapon() {
        let state = GameState {
            weapon: 42,
            ..GameState::default()
        };
        let out = compose_overlay("##", &state);
        assert!(out.contains("Weapon: Unknown"));
    }

    #[test]
    fn weapon_table_covers_known_ids() {
        assert_eq!(weapon_name(1), "Fist");
        assert_eq!(weapon_name(7), "BFG9000");
        assert_eq!(weapon_name(0), "Unknown");
        assert_eq!(weapon_name(8), "Unknown");
    }

    #[test]
    fn health_bar_clamps() {
        assert_eq!(health_bar(150), "██████████");
        assert_eq!(health_bar(-20), "░░░░░░░░░░");
        assert_eq!(health_bar(50), "█████░░░░░");
    }
}
