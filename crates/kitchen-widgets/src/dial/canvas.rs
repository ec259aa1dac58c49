//! Canvas program for the dial
//!
//! Drawing is a straight rasterization of the `DialScene` produced by
//! `kitchen_core::compose_scene`; all geometry decisions live in the core.

use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{mouse, touch, Font, Point, Rectangle, Theme, Vector};
use kitchen_core::dial::{DialScene, SeamArc};
use kitchen_core::{compose_scene, CanvasSize, Rgba};

use super::{DialGesture, DialState, GestureTracker};
use crate::theme::{to_color, LeafStyle};

/// Line segments used to approximate a seam arc
const ARC_SEGMENTS: usize = 48;
/// Labels smaller than this are skipped
const MIN_LABEL_SIZE: f32 = 2.0;

/// Canvas program drawing the dial for one progress value
///
/// `on_gesture` maps pointer gestures to application messages.
pub struct DialCanvas<'a, Message, F>
where
    F: Fn(DialGesture) -> Message,
{
    pub state: &'a DialState,
    /// Fraction of a full turn left, in `[0, 1]`
    pub progress: f32,
    pub on_gesture: F,
}

impl<'a, Message, F> Program<Message> for DialCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(DialGesture) -> Message,
{
    type State = GestureTracker;

    fn update(
        &self,
        tracker: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let gesture = match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => cursor
                .position_in(bounds)
                .map(|position| tracker.press(position.x)),
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                tracker.moved(position.x - bounds.x, bounds.width)
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => tracker.release(),
            Event::Touch(touch::Event::FingerPressed { position, .. }) => bounds
                .contains(*position)
                .then(|| tracker.press(position.x - bounds.x)),
            Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                tracker.moved(position.x - bounds.x, bounds.width)
            }
            Event::Touch(
                touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. },
            ) => tracker.release(),
            _ => None,
        }?;

        log::trace!("Dial gesture {:?}", gesture);
        Some(canvas::Action::publish((self.on_gesture)(gesture)).and_capture())
    }

    fn mouse_interaction(
        &self,
        tracker: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if tracker.is_dragging() {
            mouse::Interaction::ResizingHorizontally
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _tracker: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let scene = compose_scene(
            CanvasSize::new(bounds.width, bounds.height),
            self.progress,
            &self.state.colors,
            &self.state.layout,
            &self.state.ticks,
            self.state.debug_guides,
        );

        draw_scene(&mut frame, &scene);
        if let Some(leaf) = &self.state.leaf {
            draw_leaf(&mut frame, &scene, leaf);
        }

        vec![frame.into_geometry()]
    }
}

fn point((x, y): (f32, f32)) -> Point {
    Point::new(x, y)
}

/// Rasterize a scene in display-list order
fn draw_scene(frame: &mut Frame, scene: &DialScene) {
    let disk = Path::circle(point(scene.disk.center), scene.disk.radius);
    frame.fill(&disk, to_color(scene.disk.color));

    for seam in &scene.seams {
        frame.stroke(
            &seam_path(seam),
            Stroke::default()
                .with_color(to_color(seam.color))
                .with_width(seam.width),
        );
    }

    let [apex, left, right] = scene.pointer.points;
    let pointer = Path::new(|b| {
        b.move_to(point(apex));
        b.line_to(point(left));
        b.line_to(point(right));
        b.close();
    });
    frame.fill(&pointer, to_color(scene.pointer.color));

    for tick in &scene.ticks {
        if tick.color.a <= 0.0 || tick.width <= 0.0 {
            continue;
        }
        frame.stroke(
            &Path::line(point(tick.start), point(tick.end)),
            Stroke::default()
                .with_color(to_color(tick.color))
                .with_width(tick.width),
        );
    }

    let bold = Font {
        weight: iced::font::Weight::Bold,
        ..Font::DEFAULT
    };
    for label in &scene.labels {
        if label.color.a <= 0.0 || label.size < MIN_LABEL_SIZE {
            continue;
        }
        let (x, y) = label.position;
        frame.with_save(|frame| {
            frame.translate(Vector::new(x, y));
            frame.rotate(label.rotation);
            frame.fill_text(Text {
                content: label.text.clone(),
                position: Point::ORIGIN,
                size: label.size.into(),
                color: to_color(label.color),
                font: bold,
                align_x: Horizontal::Center.into(),
                align_y: Vertical::Bottom.into(),
                ..Text::default()
            });
        });
    }

    let shading = &scene.shading;
    let gradient = shading.stops.iter().fold(
        canvas::gradient::Linear::new(point(shading.from), point(shading.to)),
        |gradient, (offset, color)| gradient.add_stop(*offset, to_color(*color)),
    );
    frame.fill(
        &Path::circle(point(shading.center), shading.radius),
        gradient,
    );

    for guide in &scene.guides {
        frame.stroke(
            &Path::line(point(guide.from), point(guide.to)),
            Stroke::default()
                .with_color(to_color(guide.color))
                .with_width(guide.width),
        );
    }
}

/// Elliptical arc approximated by line segments
fn seam_path(seam: &SeamArc) -> Path {
    let (cx, cy) = seam.center;
    let (rx, ry) = seam.radii;
    Path::new(|b| {
        for i in 0..=ARC_SEGMENTS {
            let t = i as f32 / ARC_SEGMENTS as f32;
            let angle = seam.start_angle + (seam.end_angle - seam.start_angle) * t;
            let p = Point::new(cx + rx * angle.cos(), cy + ry * angle.sin());
            if i == 0 {
                b.move_to(p);
            } else {
                b.line_to(p);
            }
        }
    })
}

/// Pointed leaf resting on top of the fruit
fn draw_leaf(frame: &mut Frame, scene: &DialScene, leaf: &LeafStyle) {
    let (cx, cy) = scene.disk.center;
    let top = cy - scene.disk.radius;
    let center = Point::new(cx + leaf.offset_x, top + leaf.offset_y);
    let half = leaf.length / 2.0;
    let bulge = leaf.length / 4.0;

    let tip_left = Point::new(center.x - half, center.y);
    let tip_right = Point::new(center.x + half, center.y);
    let shape = Path::new(|b| {
        b.move_to(tip_left);
        b.quadratic_curve_to(Point::new(center.x, center.y - bulge), tip_right);
        b.quadratic_curve_to(Point::new(center.x, center.y + bulge), tip_left);
        b.close();
    });
    frame.fill(&shape, to_color(leaf.color));

    // Midrib
    frame.stroke(
        &Path::line(tip_left, tip_right),
        Stroke::default()
            .with_color(to_color(Rgba::BLACK.scale_alpha(0.2)))
            .with_width(1.5),
    );
}
