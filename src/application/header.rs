//! Scroll-driven header geometry.
//!
//! The header never renders anything itself: every scroll or resize event is
//! turned into a fresh set of CSS custom properties on the document root, and
//! the stylesheet does the rest. Each update recomputes from the current
//! layout, so dropped or reordered events self-correct on the next one.

use tracing::trace;

use crate::domain::{document::DocumentRoot, navigation::HOME_PATH};

/// Scroll distance past the header before it starts sliding away.
pub const UP_DELAY: f64 = 64.0;

pub const AVATAR_FROM_SCALE: f64 = 1.0;
pub const AVATAR_TO_SCALE: f64 = 36.0 / 64.0;
pub const AVATAR_FROM_X: f64 = 0.0;
/// rem
pub const AVATAR_TO_X: f64 = 2.0 / 16.0;

/// Names of the custom properties consumed by the stylesheet.
pub mod property {
    pub const HEADER_POSITION: &str = "--header-position";
    pub const HEADER_INNER_POSITION: &str = "--header-inner-position";
    pub const HEADER_HEIGHT: &str = "--header-height";
    pub const HEADER_MARGIN_BOTTOM: &str = "--header-mb";
    pub const HEADER_TOP: &str = "--header-top";
    pub const AVATAR_TOP: &str = "--avatar-top";
    pub const CONTENT_OFFSET: &str = "--content-offset";
    pub const AVATAR_IMAGE_TRANSFORM: &str = "--avatar-image-transform";
    pub const AVATAR_BORDER_TRANSFORM: &str = "--avatar-border-transform";
    pub const AVATAR_BORDER_OPACITY: &str = "--avatar-border-opacity";
}

/// Destination for computed style properties.
pub trait StyleSink {
    fn set_property(&mut self, name: &str, value: String);
    fn remove_property(&mut self, name: &str);
}

impl StyleSink for DocumentRoot {
    fn set_property(&mut self, name: &str, value: String) {
        DocumentRoot::set_property(self, name, value);
    }

    fn remove_property(&mut self, name: &str) {
        DocumentRoot::remove_property(self, name);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    /// Scroll offset limited to the scrollable range of the document.
    pub fn clamped_scroll_y(&self) -> f64 {
        clamp(
            self.scroll_y,
            0.0,
            self.document_height - self.viewport_height,
        )
    }
}

/// Bounding rect of the header element, relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderRect {
    pub top: f64,
    pub height: f64,
}

/// Read-only view of the live layout.
pub trait LayoutProbe {
    fn scroll_metrics(&self) -> ScrollMetrics;
    /// `None` while the header element is not mounted.
    fn header_rect(&self) -> Option<HeaderRect>;
    /// Offset top of the avatar placeholder; `None` when it is not mounted.
    fn avatar_offset_top(&self) -> Option<f64>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    Scroll,
    Resize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub passive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Event source the controller subscribes to for its lifetime.
pub trait ViewportEvents {
    fn add_listener(&mut self, event: ViewportEvent, options: ListenerOptions) -> ListenerId;
    fn remove_listener(&mut self, id: ListenerId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderMode {
    /// Large avatar that shrinks into the header while scrolling.
    Home,
    Inner,
}

impl HeaderMode {
    pub fn for_path(path: &str) -> Self {
        if path == HOME_PATH {
            HeaderMode::Home
        } else {
            HeaderMode::Inner
        }
    }

    pub fn is_home(self) -> bool {
        matches!(self, HeaderMode::Home)
    }

    /// Value of the `data-header-mode` attribute the page is rendered with.
    pub fn as_attribute(self) -> &'static str {
        match self {
            HeaderMode::Home => "home",
            HeaderMode::Inner => "inner",
        }
    }

    /// Anything but `home` is an inner page.
    pub fn from_attribute(value: &str) -> Self {
        if value.trim() == "home" {
            HeaderMode::Home
        } else {
            HeaderMode::Inner
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderSizing {
    pub height: f64,
    pub margin_bottom: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InnerPosition {
    /// Inner content detached from the sticky parent.
    Fixed,
    Unset,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvatarTransform {
    pub scale: f64,
    /// rem
    pub translate_x: f64,
    pub border_scale: f64,
    /// rem
    pub border_translate_x: f64,
    pub border_visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderLayout {
    pub content_offset: f64,
    /// `None` leaves the previously written height and margin in place.
    pub sizing: Option<HeaderSizing>,
    pub inner: InnerPosition,
}

/// Everything one update writes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderFrame {
    pub initial: bool,
    pub header: Option<HeaderLayout>,
    pub avatar: Option<AvatarTransform>,
}

/// Height and bottom margin of the header for the current scroll offset.
pub fn header_sizing(
    scroll_y: f64,
    rect: HeaderRect,
    down_delay: f64,
    initial: bool,
) -> Option<HeaderSizing> {
    let HeaderRect { top, height } = rect;

    if initial || scroll_y < down_delay {
        Some(HeaderSizing {
            height: down_delay + height,
            margin_bottom: -down_delay,
        })
    } else if top + height < -UP_DELAY {
        let offset = height.max(scroll_y - UP_DELAY);
        Some(HeaderSizing {
            height: offset,
            margin_bottom: height - offset,
        })
    } else if top == 0.0 {
        Some(HeaderSizing {
            height: scroll_y + height,
            margin_bottom: -scroll_y,
        })
    } else {
        None
    }
}

pub fn inner_position(scroll_y: f64, rect: HeaderRect, down_delay: f64) -> InnerPosition {
    if rect.top == 0.0 && scroll_y > 0.0 && scroll_y >= down_delay {
        InnerPosition::Fixed
    } else {
        InnerPosition::Unset
    }
}

/// Avatar shrink and slide for a raw (unclamped) scroll offset.
pub fn avatar_transform(scroll_y: f64, down_delay: f64) -> AvatarTransform {
    let progress = if down_delay > 0.0 {
        (scroll_y / down_delay).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let scale = clamp(
        lerp(AVATAR_FROM_SCALE, AVATAR_TO_SCALE, progress),
        AVATAR_FROM_SCALE,
        AVATAR_TO_SCALE,
    );
    let translate_x = clamp(
        lerp(AVATAR_FROM_X, AVATAR_TO_X, progress),
        AVATAR_FROM_X,
        AVATAR_TO_X,
    );

    // Keeps the border ring anchored to the unscaled avatar position.
    let border_scale = scale / AVATAR_TO_SCALE;
    let border_translate_x = (translate_x - AVATAR_TO_X) * border_scale;

    AvatarTransform {
        scale,
        translate_x,
        border_scale,
        border_translate_x,
        border_visible: scale == AVATAR_TO_SCALE,
    }
}

pub fn compute_frame(
    metrics: ScrollMetrics,
    header: Option<HeaderRect>,
    down_delay: f64,
    initial: bool,
    with_avatar: bool,
) -> HeaderFrame {
    let scroll_y = metrics.clamped_scroll_y();

    let header = header.map(|rect| HeaderLayout {
        content_offset: down_delay,
        sizing: header_sizing(scroll_y, rect, down_delay, initial),
        inner: inner_position(scroll_y, rect, down_delay),
    });

    let avatar = with_avatar.then(|| avatar_transform(metrics.scroll_y, down_delay));

    HeaderFrame {
        initial,
        header,
        avatar,
    }
}

impl HeaderFrame {
    pub fn write_to<S: StyleSink + ?Sized>(&self, sink: &mut S) {
        if let Some(layout) = &self.header {
            if self.initial {
                sink.set_property(property::HEADER_POSITION, "sticky".to_string());
            }

            sink.set_property(property::CONTENT_OFFSET, px(layout.content_offset));

            if let Some(sizing) = layout.sizing {
                sink.set_property(property::HEADER_HEIGHT, px(sizing.height));
                sink.set_property(property::HEADER_MARGIN_BOTTOM, px(sizing.margin_bottom));
            }

            match layout.inner {
                InnerPosition::Fixed => {
                    sink.set_property(property::HEADER_INNER_POSITION, "fixed".to_string());
                    sink.remove_property(property::HEADER_TOP);
                    sink.remove_property(property::AVATAR_TOP);
                }
                InnerPosition::Unset => {
                    sink.remove_property(property::HEADER_INNER_POSITION);
                    sink.set_property(property::HEADER_TOP, "0px".to_string());
                    sink.set_property(property::AVATAR_TOP, "0px".to_string());
                }
            }
        }

        if let Some(avatar) = &self.avatar {
            sink.set_property(
                property::AVATAR_IMAGE_TRANSFORM,
                transform(avatar.translate_x, avatar.scale),
            );
            sink.set_property(
                property::AVATAR_BORDER_TRANSFORM,
                transform(avatar.border_translate_x, avatar.border_scale),
            );
            let opacity = if avatar.border_visible { "1" } else { "0" };
            sink.set_property(property::AVATAR_BORDER_OPACITY, opacity.to_string());
        }
    }
}

/// Fixed header geometry used to paint the first frame before any layout
/// measurement is available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderGeometry {
    pub avatar_offset: f64,
    pub header_height: f64,
}

impl HeaderGeometry {
    pub fn first_frame(&self, mode: HeaderMode) -> HeaderFrame {
        let down_delay = if mode.is_home() {
            self.avatar_offset
        } else {
            0.0
        };
        let metrics = ScrollMetrics {
            scroll_y: 0.0,
            viewport_height: 0.0,
            document_height: 0.0,
        };
        let rect = HeaderRect {
            top: 0.0,
            height: self.header_height,
        };

        compute_frame(metrics, Some(rect), down_delay, true, mode.is_home())
    }
}

#[derive(Clone, Copy, Debug)]
struct Subscription {
    scroll: ListenerId,
    resize: ListenerId,
}

/// Keeps the header properties in sync with scrolling between
/// [`attach`](Self::attach) and [`detach`](Self::detach).
#[derive(Debug)]
pub struct ScrollHeaderController {
    mode: HeaderMode,
    down_delay: f64,
    initial: bool,
    subscription: Option<Subscription>,
}

impl ScrollHeaderController {
    pub fn new(mode: HeaderMode) -> Self {
        Self {
            mode,
            down_delay: 0.0,
            initial: true,
            subscription: None,
        }
    }

    pub fn down_delay(&self) -> f64 {
        self.down_delay
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Measure the avatar offset, paint the first frame and subscribe to
    /// scroll (passive) and resize. A second call while attached does nothing.
    pub fn attach<E, L, S>(&mut self, events: &mut E, layout: &L, sink: &mut S)
    where
        E: ViewportEvents + ?Sized,
        L: LayoutProbe + ?Sized,
        S: StyleSink + ?Sized,
    {
        if self.subscription.is_some() {
            return;
        }

        self.down_delay = layout.avatar_offset_top().unwrap_or(0.0);
        self.initial = true;
        self.update(layout, sink);

        let scroll = events.add_listener(ViewportEvent::Scroll, ListenerOptions { passive: true });
        let resize = events.add_listener(ViewportEvent::Resize, ListenerOptions::default());
        self.subscription = Some(Subscription { scroll, resize });
    }

    pub fn handle<L, S>(&mut self, event: ViewportEvent, layout: &L, sink: &mut S)
    where
        L: LayoutProbe + ?Sized,
        S: StyleSink + ?Sized,
    {
        if self.subscription.is_none() {
            return;
        }

        trace!(target = "folio::header", ?event, "recomputing header styles");
        self.update(layout, sink);
    }

    /// Remove both listeners. Safe to call when not attached.
    pub fn detach<E: ViewportEvents + ?Sized>(&mut self, events: &mut E) {
        if let Some(subscription) = self.subscription.take() {
            events.remove_listener(subscription.scroll);
            events.remove_listener(subscription.resize);
        }
    }

    fn update<L, S>(&mut self, layout: &L, sink: &mut S)
    where
        L: LayoutProbe + ?Sized,
        S: StyleSink + ?Sized,
    {
        let with_avatar = self.mode.is_home() && layout.avatar_offset_top().is_some();
        let frame = compute_frame(
            layout.scroll_metrics(),
            layout.header_rect(),
            self.down_delay,
            self.initial,
            with_avatar,
        );
        frame.write_to(sink);
        self.initial = false;
    }
}

/// Clamp with bounds given in either order.
fn clamp(value: f64, a: f64, b: f64) -> f64 {
    let min = a.min(b);
    let max = a.max(b);
    value.max(min).min(max)
}

fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}

fn css_number(value: f64) -> String {
    // Avoid rendering negative zero as `-0`.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}")
}

fn px(value: f64) -> String {
    format!("{}px", css_number(value))
}

fn transform(translate_x: f64, scale: f64) -> String {
    format!(
        "translate3d({}rem, 0, 0) scale({})",
        css_number(translate_x),
        css_number(scale)
    )
}
