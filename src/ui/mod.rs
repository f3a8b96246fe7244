//! Stateless egui helpers shared by the globe and the lightbox painters.

use eframe::egui;
use orbit_gallery::engine::Affordance;
use orbit_gallery::render::PixelRect;

// ─── Conversions ──────────────────────────────────────────────────────────────

pub fn to_vec2(p: egui::Vec2) -> glam::Vec2 {
    glam::Vec2::new(p.x, p.y)
}

pub fn to_rect(r: PixelRect) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(r.left, r.top), egui::vec2(r.width, r.height))
}

/// Map the library's pointer affordance onto an egui cursor.
pub fn cursor_icon(affordance: Affordance) -> egui::CursorIcon {
    match affordance {
        Affordance::Default => egui::CursorIcon::Default,
        Affordance::Pointer => egui::CursorIcon::PointingHand,
        Affordance::ZoomOut => egui::CursorIcon::ZoomOut,
    }
}

// ─── Recede transform ─────────────────────────────────────────────────────────

pub fn scale_about(p: egui::Pos2, center: egui::Pos2, scale: f32) -> egui::Pos2 {
    center + (p - center) * scale
}

/// Inverse of [`scale_about`].
pub fn unscale_about(p: egui::Pos2, center: egui::Pos2, scale: f32) -> egui::Pos2 {
    if scale <= 0.0 {
        return p;
    }
    center + (p - center) / scale
}

// ─── Images ───────────────────────────────────────────────────────────────────

/// UV sub-rectangle that makes an image of `image_aspect` cover a frame of
/// `frame_aspect`, cropping the overflow evenly on both sides.
pub fn cover_uv(image_aspect: f32, frame_aspect: f32) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if !(image_aspect > 0.0 && frame_aspect > 0.0) {
        return full;
    }
    if image_aspect > frame_aspect {
        let visible = frame_aspect / image_aspect;
        let u0 = (1.0 - visible) * 0.5;
        egui::Rect::from_min_max(egui::pos2(u0, 0.0), egui::pos2(u0 + visible, 1.0))
    } else {
        let visible = image_aspect / frame_aspect;
        let v0 = (1.0 - visible) * 0.5;
        egui::Rect::from_min_max(egui::pos2(0.0, v0), egui::pos2(1.0, v0 + visible))
    }
}

/// Paint a textured quad. `corners` run bottom-left, bottom-right,
/// top-right, top-left in the card's own frame.
pub fn paint_textured_quad(
    painter: &egui::Painter,
    corners: [egui::Pos2; 4],
    texture: egui::TextureId,
    uv: egui::Rect,
    tint: egui::Color32,
) {
    let mut mesh = egui::Mesh::with_texture(texture);
    let uvs = [uv.left_bottom(), uv.right_bottom(), uv.right_top(), uv.left_top()];
    for (pos, uv) in corners.into_iter().zip(uvs) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos,
            uv,
            color: tint,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}

/// Stand-in for media that is still loading or failed to load. Same
/// footprint as the real card.
pub fn paint_placeholder(painter: &egui::Painter, corners: [egui::Pos2; 4], failed: bool, tint: egui::Color32) {
    let fill = if failed {
        egui::Color32::from_gray(70)
    } else {
        egui::Color32::from_gray(40)
    };
    let fill = tint_color(fill, tint);
    painter.add(egui::Shape::convex_polygon(
        corners.to_vec(),
        fill,
        egui::Stroke::new(1.0, tint_color(egui::Color32::from_gray(90), tint)),
    ));
    if failed {
        let stroke = egui::Stroke::new(1.5, tint_color(egui::Color32::from_gray(140), tint));
        painter.line_segment([corners[0], corners[2]], stroke);
        painter.line_segment([corners[1], corners[3]], stroke);
    }
}

/// Component-wise multiply (both premultiplied).
pub fn tint_color(color: egui::Color32, tint: egui::Color32) -> egui::Color32 {
    let mul = |a: u8, b: u8| ((a as u16 * b as u16 + 127) / 255) as u8;
    egui::Color32::from_rgba_premultiplied(
        mul(color.r(), tint.r()),
        mul(color.g(), tint.g()),
        mul(color.b(), tint.b()),
        mul(color.a(), tint.a()),
    )
}

/// Image MIME type from a file extension.
pub fn guess_mime(path: &std::path::Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_uv_is_full_for_matching_aspect() {
        let uv = cover_uv(1.5, 1.5);
        assert!((uv.min.x).abs() < 1e-6 && (uv.max.x - 1.0).abs() < 1e-6);
        assert!((uv.min.y).abs() < 1e-6 && (uv.max.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cover_uv_crops_wide_image_horizontally() {
        let uv = cover_uv(2.0, 1.0);
        assert!((uv.min.x - 0.25).abs() < 1e-6);
        assert!((uv.max.x - 0.75).abs() < 1e-6);
        assert_eq!((uv.min.y, uv.max.y), (0.0, 1.0));
    }

    #[test]
    fn cover_uv_crops_tall_image_vertically() {
        let uv = cover_uv(0.5, 1.0);
        assert!((uv.min.y - 0.25).abs() < 1e-6);
        assert!((uv.max.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn unscale_inverts_scale() {
        let c = egui::pos2(800.0, 450.0);
        let p = egui::pos2(100.0, 700.0);
        let q = unscale_about(scale_about(p, c, 0.95), c, 0.95);
        assert!((q - p).length() < 1e-3);
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(guess_mime(std::path::Path::new("a/B.JPG")), Some("image/jpeg"));
        assert_eq!(guess_mime(std::path::Path::new("notes.txt")), None);
    }
}
