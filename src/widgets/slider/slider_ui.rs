//! egui front end for [`VideoSlider`]: paints the retained visuals and feeds
//! pointer, key and wheel input back into the model.

use eframe::egui::{self, Color32, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

use super::mark::Rgb;
use super::slider::VideoSlider;
use super::visuals::SceneRect;
use crate::core::slider_events::{KeyInput, Modifiers};

const COLOR_BACKGROUND: Color32 = Color32::from_rgb(235, 235, 235);
const COLOR_HEADER: Color32 = Color32::from_rgb(250, 250, 250);
const COLOR_HANDLE: Color32 = Color32::from_rgb(80, 80, 255);
const COLOR_SELECTION: Color32 = Color32::from_rgba_premultiplied(0, 0, 80, 60);
const COLOR_SPARKLINE: Color32 = Color32::from_rgb(128, 128, 128);

fn to_color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

fn to_modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers { shift: m.shift, alt: m.alt, ctrl: m.ctrl || m.mac_cmd }
}

/// Scene <-> screen mapping for one frame.
#[derive(Clone, Copy)]
struct View {
    origin: Pos2,
    scroll_x: f32,
}

impl View {
    fn pos(&self, x: f32, y: f32) -> Pos2 {
        Pos2::new(self.origin.x + x - self.scroll_x, self.origin.y + y)
    }

    fn rect(&self, r: SceneRect) -> Rect {
        Rect::from_min_size(self.pos(r.x, r.y), Vec2::new(r.w, r.h))
    }

    fn scene(&self, p: Pos2) -> (f32, f32) {
        (p.x - self.origin.x + self.scroll_x, p.y - self.origin.y)
    }
}

/// Show the slider across the available width.
///
/// The response is marked changed when the value moved this frame. Events go
/// through the slider's emitter as usual.
pub fn video_slider(ui: &mut Ui, slider: &mut VideoSlider) -> Response {
    let width = ui.available_width().max(2.0);
    if (slider.view_width() - width).abs() > 0.5 {
        slider.resize(width);
    }

    let (_, max_h) = slider.min_max_heights();
    let height = max_h.max(slider.box_rect().h + 2.0);
    let (rect, mut response) = ui.allocate_exact_size(Vec2::new(width, height), Sense::click_and_drag());

    let before = slider.value();
    handle_input(ui, &response, rect, slider);
    if slider.value() != before {
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let view = View { origin: rect.min, scroll_x: slider.scroll_x() };
        let painter = ui.painter_at(rect);
        draw_background(&painter, view, slider);
        draw_marks(&painter, view, slider);
        draw_header(&painter, view, slider);
        draw_boxes(&painter, view, slider);
        draw_handle(&painter, view, slider);
    }

    response
}

fn handle_input(ui: &Ui, response: &Response, rect: Rect, slider: &mut VideoSlider) {
    let view = View { origin: rect.min, scroll_x: slider.scroll_x() };
    let modifiers = to_modifiers(ui.input(|i| i.modifiers));

    if response.drag_started() {
        response.request_focus();
        if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
            let (x, y) = view.scene(origin);
            slider.pointer_pressed(x, y, modifiers);
        }
    }
    if response.dragged() && response.drag_delta() != Vec2::ZERO {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = view.scene(pos);
            slider.pointer_moved(x, y);
        }
    }
    if response.drag_stopped() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = view.scene(pos);
            slider.pointer_released(x, y);
        }
    }

    // short clicks never become drags
    if response.clicked() {
        response.request_focus();
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = view.scene(pos);
            slider.pointer_pressed(x, y, modifiers);
            slider.pointer_released(x, y);
        }
    }
    if response.double_clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = view.scene(pos);
            slider.pointer_double_clicked(x, y, modifiers);
        }
    }

    if response.has_focus() {
        let events = ui.input(|i| i.events.clone());
        for event in events {
            if let egui::Event::Key { key, pressed, modifiers, .. } = event {
                let input = KeyInput::new(key.name(), to_modifiers(modifiers));
                if pressed {
                    slider.key_pressed(input);
                } else {
                    slider.key_released(input);
                }
            }
        }
    }

    if response.hovered() && slider.zoom_factor() > 1.0 {
        let delta = ui.input(|i| i.smooth_scroll_delta);
        let dx = -(delta.x + delta.y);
        if dx != 0.0 {
            slider.scroll_by(dx);
        }
    }
}

fn draw_background(painter: &egui::Painter, view: View, slider: &VideoSlider) {
    let body = slider.box_rect();
    painter.rect_filled(view.rect(body), 0.0, COLOR_BACKGROUND);

    let header = SceneRect::new(body.x, body.y, body.w, slider.header_height());
    painter.rect_filled(view.rect(header), 0.0, COLOR_HEADER);
}

fn draw_marks(painter: &egui::Painter, view: View, slider: &VideoSlider) {
    let font = egui::FontId::proportional(slider.config().label_font_px);
    for visual in slider.backend().by_z() {
        let rect = view.rect(visual.rect);
        let color = to_color32(visual.color);
        if visual.filled {
            painter.rect_filled(rect, 0.0, color);
        } else {
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, color), egui::StrokeKind::Inside);
        }
        if let Some(label) = &visual.label {
            painter.text(
                view.pos(visual.label_x + 2.0, 2.0),
                egui::Align2::LEFT_TOP,
                label,
                font.clone(),
                Color32::from_gray(60),
            );
        }
    }
}

/// Sparkline: outline plus one convex quad per segment down to the baseline.
fn draw_header(painter: &egui::Painter, view: View, slider: &VideoSlider) {
    let path = slider.header_path();
    if path.len() < 2 {
        return;
    }
    let base = slider.header_height();
    let points: Vec<Pos2> = path.iter().map(|p| view.pos(p[0], p[1])).collect();

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let quad = vec![a, b, Pos2::new(b.x, view.pos(0.0, base).y), Pos2::new(a.x, view.pos(0.0, base).y)];
        painter.add(egui::Shape::convex_polygon(quad, COLOR_SPARKLINE.gamma_multiply(0.5), Stroke::NONE));
    }
    painter.line(points, Stroke::new(1.0, COLOR_SPARKLINE));
}

fn draw_boxes(painter: &egui::Painter, view: View, slider: &VideoSlider) {
    if let Some(select) = slider.selection_box() {
        painter.rect_filled(view.rect(select), 0.0, COLOR_SELECTION);
    }
    if let Some(zoom) = slider.zoom_box() {
        painter.rect_stroke(
            view.rect(zoom),
            0.0,
            Stroke::new(1.0, Color32::from_rgb(0, 0, 200)),
            egui::StrokeKind::Inside,
        );
    }
}

fn draw_handle(painter: &egui::Painter, view: View, slider: &VideoSlider) {
    let handle = view.rect(slider.handle_rect());
    let fill = if slider.enabled() { COLOR_HANDLE } else { Color32::from_gray(160) };
    painter.rect_filled(handle, 1.0, fill.gamma_multiply(0.6));
    painter.rect_stroke(handle, 1.0, Stroke::new(1.0, fill), egui::StrokeKind::Inside);
}
