// Wayland integration module
// Hosts the banner in a layer-shell overlay using smithay-client-toolkit

use crate::animation::{SlideAnimation, SlotFrame};
use crate::carousel::{Carousel, Direction, IndicatorStrip, PageSurface};
use crate::cli::ParsedArgs;
use crate::image_loader::PageImage;
use crate::layout::{self, BannerLayout, Hit};
use crate::render::{self, Canvas, Quality, Scene};
use crate::style::BannerStyle;
use anyhow::{anyhow, Context, Result};
use log::{debug, error, info};
use smithay_client_toolkit::{
    compositor::{CompositorHandler, CompositorState},
    delegate_compositor, delegate_keyboard, delegate_layer, delegate_output, delegate_pointer,
    delegate_registry, delegate_seat, delegate_shm,
    output::{OutputHandler, OutputState},
    reexports::{calloop::EventLoop, calloop_wayland_source::WaylandSource},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
    seat::{
        keyboard::{KeyEvent, KeyboardHandler, Keysym, Modifiers},
        pointer::{PointerEvent, PointerEventKind, PointerHandler},
        Capability, SeatHandler, SeatState,
    },
    shell::{
        wlr_layer::{
            Anchor, KeyboardInteractivity, Layer, LayerShell, LayerShellHandler, LayerSurface,
            LayerSurfaceConfigure,
        },
        WaylandSurface,
    },
    shm::{
        slot::{Buffer, SlotPool},
        Shm, ShmHandler,
    },
};
use std::rc::Rc;
use std::time::{Duration, Instant};
use wayland_client::{
    globals::registry_queue_init,
    protocol::{wl_keyboard, wl_output, wl_pointer, wl_seat, wl_shm, wl_surface},
    Connection, QueueHandle,
};

/// Mouse button constants
const BTN_LEFT: u32 = 272;

/// Wakeup period while a slide transition is running (~60fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Pages are shared between the carousel and the slots showing them
pub type Page = Rc<PageImage>;

/// Left/center/right slots and the running transition
#[derive(Default)]
pub struct BannerView {
    left: Option<Page>,
    center: Option<Page>,
    right: Option<Page>,
    animation: Option<SlideAnimation>,
    dirty: bool,
}

impl BannerView {
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

impl PageSurface<Page> for BannerView {
    fn set_left(&mut self, page: &Page) {
        self.left = Some(Rc::clone(page));
        self.dirty = true;
    }

    fn set_center(&mut self, page: &Page) {
        self.center = Some(Rc::clone(page));
        self.dirty = true;
    }

    fn set_right(&mut self, page: &Page) {
        self.right = Some(Rc::clone(page));
        self.dirty = true;
    }

    fn play_transition(&mut self, direction: Direction) {
        // A transition started mid-slide replaces the running one
        self.animation = Some(SlideAnimation::new(direction, Instant::now()));
        self.dirty = true;
    }
}

/// Selection state of the indicator markers
#[derive(Default)]
pub struct MarkerStrip {
    selected: Vec<bool>,
    dirty: bool,
}

impl MarkerStrip {
    pub fn selected(&self) -> &[bool] {
        &self.selected
    }
}

impl IndicatorStrip for MarkerStrip {
    fn add_marker(&mut self) {
        self.selected.push(false);
        self.dirty = true;
    }

    fn select(&mut self, index: usize, selected: bool) {
        if let Some(marker) = self.selected.get_mut(index) {
            *marker = selected;
            self.dirty = true;
        }
    }
}

pub type Banner = Carousel<Page, BannerView, MarkerStrip>;

/// Build the carousel for the loaded pages and configure autoplay
pub fn build_banner(pages: Vec<PageImage>, delay_ms: u64, autoplay: bool) -> Banner {
    let mut banner = Banner::new(BannerView::default(), MarkerStrip::default());
    banner.on_page_activated(|index| info!("Current page clicked: {}", index));
    banner.on_index_changed(|index| debug!("Current page is now {}", index));

    banner.append_all(pages.into_iter().map(Rc::new));
    banner.set_autoplay_interval(delay_ms, autoplay);
    banner
}

/// Arrow visibility and hover target at `pos`
///
/// Moving onto a marker other than `previous` jumps straight to its page.
fn route_hover(
    layout: &BannerLayout,
    banner: &mut Banner,
    previous: Hit,
    (x, y): (f64, f64),
) -> (bool, Hit) {
    let arrows_visible = layout.view().contains(x, y);
    let hovered = layout.hit_test(x, y, arrows_visible);

    if hovered != previous {
        if let Hit::Marker(index) = hovered {
            banner.select_index(index);
        }
    }
    (arrows_visible, hovered)
}

/// Complete a left click; returns the clicked element, if any
///
/// Only a release over the element that was pressed counts as a click.
fn route_release(
    layout: &BannerLayout,
    banner: &mut Banner,
    pressed: Option<Hit>,
    (x, y): (f64, f64),
    arrows_visible: bool,
) -> Option<Hit> {
    let hit = layout.hit_test(x, y, arrows_visible);
    if pressed != Some(hit) {
        return None;
    }

    debug!("Clicked {:?}", hit);
    match hit {
        Hit::Marker(index) => banner.select_index(index),
        other => {
            if let Some(direction) = other.direction() {
                banner.navigate(direction);
            }
        }
    }
    Some(hit)
}

/// Main Wayland application state
struct WaylandApp {
    // Registry state
    registry_state: RegistryState,
    // Seat state for input handling
    seat_state: SeatState,
    // Output state for display info
    output_state: OutputState,
    // Shared memory for buffer allocation
    shm: Shm,
    // Layer shell for overlay windows
    layer_shell: LayerShell,
    // Compositor state
    compositor_state: CompositorState,

    // Application-specific state
    banner: Banner,
    style: BannerStyle,
    opacity: f32,
    should_exit: bool,

    // Surface and buffer management
    layer_surface: Option<LayerSurface>,
    pool: Option<SlotPool>,
    buffer: Option<Buffer>,
    width: u32,
    height: u32,
    configured: bool,
    layout: BannerLayout,

    // Window position (margins from top-left)
    margin_left: i32,
    margin_top: i32,

    // Pointer state
    pointer_pos: (f64, f64),
    arrows_visible: bool,
    hovered: Hit,
    pressed: Option<Hit>,

    // Redraw flag
    needs_redraw: bool,
}

impl WaylandApp {
    /// Create a new Wayland application
    fn new(
        registry_state: RegistryState,
        seat_state: SeatState,
        output_state: OutputState,
        shm: Shm,
        layer_shell: LayerShell,
        compositor_state: CompositorState,
        banner: Banner,
        style: BannerStyle,
        opacity: f32,
    ) -> Self {
        let (width, height) = layout::preferred_size();
        let layout = BannerLayout::new(width, height, banner.len());
        Self {
            registry_state,
            seat_state,
            output_state,
            shm,
            layer_shell,
            compositor_state,
            banner,
            style,
            opacity,
            should_exit: false,
            layer_surface: None,
            pool: None,
            buffer: None,
            width,
            height,
            configured: false,
            layout,
            margin_left: 100,
            margin_top: 100,
            pointer_pos: (0.0, 0.0),
            arrows_visible: false,
            hovered: Hit::None,
            pressed: None,
            needs_redraw: false,
        }
    }

    /// Recompute element geometry for the current size
    fn relayout(&mut self) {
        self.layout = BannerLayout::new(self.width, self.height, self.banner.len());
        self.needs_redraw = true;
    }

    /// How long the event loop may sleep before we have work to do
    fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        if self.banner.surface().is_animating() {
            return Some(FRAME_INTERVAL);
        }
        self.banner.autoplay().time_until_tick(now)
    }

    fn wants_redraw(&self) -> bool {
        self.needs_redraw
            || self.banner.surface().dirty
            || self.banner.surface().is_animating()
            || self.banner.indicators().dirty
    }

    /// Refresh hover state from the pointer position
    fn update_hover(&mut self) {
        let (arrows_visible, hovered) =
            route_hover(&self.layout, &mut self.banner, self.hovered, self.pointer_pos);

        if arrows_visible != self.arrows_visible {
            self.arrows_visible = arrows_visible;
            self.needs_redraw = true;
        }

        if hovered != self.hovered {
            let arrow_changed = matches!(self.hovered, Hit::LeftArrow | Hit::RightArrow)
                || matches!(hovered, Hit::LeftArrow | Hit::RightArrow);
            self.hovered = hovered;
            if arrow_changed {
                self.needs_redraw = true;
            }
        }
    }

    /// Draw using CPU (shared memory buffer)
    fn draw(&mut self) {
        if !self.configured || self.layer_surface.is_none() {
            return;
        }

        let width = self.width;
        let height = self.height;
        let stride = width as i32 * 4;
        let buffer_size = (stride * height as i32) as usize;

        // Initialize pool if needed
        if self.pool.is_none() {
            match SlotPool::new(buffer_size, &self.shm) {
                Ok(pool) => self.pool = Some(pool),
                Err(e) => {
                    error!("Failed to create slot pool: {}. Buffer size: {} bytes", e, buffer_size);
                    return;
                }
            }
        }

        let Some(pool) = self.pool.as_mut() else {
            return;
        };

        // Resize pool if needed
        if pool.len() < buffer_size {
            if let Err(e) = pool.resize(buffer_size) {
                error!("Failed to resize pool to {} bytes: {}", buffer_size, e);
                self.pool = None;
                return;
            }
        }

        let (buffer, canvas) =
            match pool.create_buffer(width as i32, height as i32, stride, wl_shm::Format::Argb8888) {
                Ok(buf) => buf,
                Err(e) => {
                    error!("Failed to create buffer {}x{}: {}", width, height, e);
                    return;
                }
            };

        // Finished transitions get one last high quality docked frame
        let now = Instant::now();
        let view = self.banner.surface();
        let (frame, quality) = match view.animation {
            Some(animation) if !animation.is_finished(now) => {
                (animation.frame(&self.layout, now), Quality::Fast)
            }
            _ => (SlotFrame::docked(&self.layout), Quality::Smooth),
        };

        let scene = Scene {
            layout: &self.layout,
            frame,
            left: view.left.as_deref(),
            center: view.center.as_deref(),
            right: view.right.as_deref(),
            markers: self.banner.indicators().selected(),
            arrows_visible: self.arrows_visible,
            hovered: self.hovered,
            style: &self.style,
            opacity: self.opacity,
            quality,
        };
        render::render_banner(&mut Canvas::new(canvas, width, height), &scene);

        // Attach and commit
        let Some(layer_surface) = self.layer_surface.as_ref() else {
            return;
        };
        let surface = layer_surface.wl_surface();
        if let Err(e) = buffer.attach_to(surface) {
            error!("Failed to attach buffer: {}", e);
            return;
        }
        surface.damage_buffer(0, 0, width as i32, height as i32);
        surface.commit();

        self.buffer = Some(buffer);
        self.needs_redraw = false;

        let view = self.banner.surface_mut();
        view.dirty = false;
        if view.animation.is_some_and(|a| a.is_finished(now)) {
            view.animation = None;
        }
        self.banner.indicators_mut().dirty = false;
    }
}

// Implement required traits for smithay-client-toolkit
impl CompositorHandler for WaylandApp {
    fn scale_factor_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_factor: i32,
    ) {
        debug!("Scale factor changed");
    }

    fn transform_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_transform: wl_output::Transform,
    ) {
        debug!("Transform changed");
    }

    fn frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _time: u32,
    ) {
        if self.wants_redraw() {
            self.draw();
        }
    }

    fn surface_enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }

    fn surface_leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }
}

impl OutputHandler for WaylandApp {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
        debug!("New output detected");
    }

    fn update_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
        debug!("Output updated");
    }

    fn output_destroyed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
        debug!("Output destroyed");
    }
}

impl LayerShellHandler for WaylandApp {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _layer: &LayerSurface) {
        info!("Layer surface closed");
        self.should_exit = true;
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _layer: &LayerSurface,
        configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        debug!("Layer surface configured: {:?}", configure);

        let (new_width, new_height) = configure.new_size;
        if new_width > 0 && new_width != self.width {
            self.width = new_width;
            self.pool = None;
        }
        if new_height > 0 && new_height != self.height {
            self.height = new_height;
            self.pool = None;
        }

        if !self.configured {
            info!("Banner window configured at {}x{}", self.width, self.height);
        }
        self.configured = true;
        self.relayout();
        self.draw();
    }
}

impl SeatHandler for WaylandApp {
    fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }

    fn new_seat(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _seat: wl_seat::WlSeat) {
        debug!("New seat");
    }

    fn new_capability(
        &mut self,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
        seat: wl_seat::WlSeat,
        capability: Capability,
    ) {
        debug!("New capability: {:?}", capability);

        if capability == Capability::Keyboard {
            if let Err(e) = self.seat_state.get_keyboard(qh, &seat, None) {
                error!("Failed to get keyboard: {}", e);
            }
        }
        if capability == Capability::Pointer {
            if let Err(e) = self.seat_state.get_pointer(qh, &seat) {
                error!("Failed to get pointer: {}", e);
            }
        }
    }

    fn remove_capability(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _seat: wl_seat::WlSeat,
        _capability: Capability,
    ) {
        debug!("Capability removed");
    }

    fn remove_seat(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _seat: wl_seat::WlSeat) {
        debug!("Seat removed");
    }
}

impl KeyboardHandler for WaylandApp {
    fn enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _surface: &wl_surface::WlSurface,
        _serial: u32,
        _raw: &[u32],
        _keysyms: &[Keysym],
    ) {
        debug!("Keyboard entered surface");
    }

    fn leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _surface: &wl_surface::WlSurface,
        _serial: u32,
    ) {
        debug!("Keyboard left surface");
    }

    fn press_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: KeyEvent,
    ) {
        debug!("Key pressed: {:?}", event.keysym);

        match event.keysym {
            Keysym::Escape | Keysym::q => {
                info!("Exit key pressed");
                self.should_exit = true;
            }
            Keysym::Left => self.banner.navigate(Direction::Previous),
            Keysym::Right => self.banner.navigate(Direction::Next),
            Keysym::Return | Keysym::space => self.banner.navigate(Direction::Stay),
            Keysym::p => {
                if self.banner.autoplay().is_enabled() {
                    self.banner.stop_autoplay();
                } else {
                    self.banner.start_autoplay();
                }
                info!("Autoplay {}", if self.banner.autoplay().is_enabled() { "on" } else { "off" });
            }
            _ => {}
        }
    }

    fn release_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        _event: KeyEvent,
    ) {
    }

    fn update_modifiers(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        _modifiers: Modifiers,
        _layout: u32,
    ) {
    }
}

impl PointerHandler for WaylandApp {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            match event.kind {
                PointerEventKind::Enter { .. } => {
                    debug!("Pointer entered");
                    self.banner.hover_enter();
                    self.pointer_pos = event.position;
                    self.update_hover();
                }
                PointerEventKind::Leave { .. } => {
                    debug!("Pointer left");
                    self.banner.hover_leave();
                    self.arrows_visible = false;
                    self.hovered = Hit::None;
                    self.pressed = None;
                    self.needs_redraw = true;
                }
                PointerEventKind::Motion { .. } => {
                    self.pointer_pos = event.position;
                    self.update_hover();
                }
                PointerEventKind::Press { button, .. } => {
                    debug!("Pointer button pressed: {}", button);
                    if button == BTN_LEFT {
                        let (x, y) = self.pointer_pos;
                        self.pressed = Some(self.layout.hit_test(x, y, self.arrows_visible));
                    }
                }
                PointerEventKind::Release { button, .. } => {
                    if button == BTN_LEFT {
                        route_release(
                            &self.layout,
                            &mut self.banner,
                            self.pressed.take(),
                            self.pointer_pos,
                            self.arrows_visible,
                        );
                    }
                }
                _ => {}
            }
        }
    }
}

impl ShmHandler for WaylandApp {
    fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm
    }
}

impl ProvidesRegistryState for WaylandApp {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    registry_handlers![OutputState, SeatState];
}

// Delegate macros
delegate_compositor!(WaylandApp);
delegate_output!(WaylandApp);
delegate_layer!(WaylandApp);
delegate_seat!(WaylandApp);
delegate_keyboard!(WaylandApp);
delegate_pointer!(WaylandApp);
delegate_shm!(WaylandApp);
delegate_registry!(WaylandApp);

/// Run the Wayland application
pub fn run(args: ParsedArgs, pages: Vec<PageImage>) -> Result<()> {
    info!("Connecting to Wayland display");

    // Connect to Wayland display
    let conn = Connection::connect_to_env().context("Failed to connect to Wayland display")?;

    // Initialize registry and event queue
    let (globals, mut event_queue) =
        registry_queue_init(&conn).context("Failed to initialize registry")?;
    let qh = event_queue.handle();

    // Initialize required globals
    let compositor_state =
        CompositorState::bind(&globals, &qh).context("Failed to bind compositor")?;
    let layer_shell = LayerShell::bind(&globals, &qh).context("Failed to bind layer shell")?;
    let shm = Shm::bind(&globals, &qh).context("Failed to bind shm")?;

    let banner = build_banner(pages, args.delay_ms, args.autoplay);
    info!(
        "Banner has {} page(s), autoplay: {} every {:?}",
        banner.len(),
        banner.autoplay().is_enabled(),
        banner.autoplay().interval()
    );

    // Create application state
    let mut app = WaylandApp::new(
        RegistryState::new(&globals),
        SeatState::new(&globals, &qh),
        OutputState::new(&globals, &qh),
        shm,
        layer_shell,
        compositor_state,
        banner,
        args.style,
        args.opacity,
    );

    // Dispatch once to get output info
    event_queue.roundtrip(&mut app)?;

    // Get display dimensions from outputs
    let (display_width, display_height) = get_display_dimensions(&app.output_state);
    info!("Display dimensions: {}x{}", display_width, display_height);

    // Set initial window position (centered unless given)
    app.margin_left = args
        .pos_x
        .unwrap_or((display_width as i32 - app.width as i32) / 2);
    app.margin_top = args
        .pos_y
        .unwrap_or((display_height as i32 - app.height as i32) / 2);

    // Create the layer surface
    let surface = app.compositor_state.create_surface(&qh);
    let layer_surface = app.layer_shell.create_layer_surface(
        &qh,
        surface,
        Layer::Overlay,
        Some("rbanner"),
        None,
    );

    // Configure the layer surface with anchoring for positioning
    layer_surface.set_anchor(Anchor::TOP | Anchor::LEFT);
    layer_surface.set_margin(app.margin_top, 0, 0, app.margin_left);
    layer_surface.set_size(app.width, app.height);
    layer_surface.set_keyboard_interactivity(KeyboardInteractivity::OnDemand);

    // Commit the surface to trigger configure
    layer_surface.commit();

    app.layer_surface = Some(layer_surface);

    // The event loop wakes up for Wayland events, autoplay ticks and animation frames
    let mut event_loop: EventLoop<WaylandApp> =
        EventLoop::try_new().context("Failed to create event loop")?;
    WaylandSource::new(conn, event_queue)
        .insert(event_loop.handle())
        .map_err(|e| anyhow!("Failed to insert Wayland source: {}", e.error))?;

    info!("Starting event loop");
    info!("Controls: Click arrows or side pages to navigate, hover indicators to jump, Esc to close");

    // Main event loop
    loop {
        let timeout = app.next_wakeup(Instant::now());
        event_loop
            .dispatch(timeout, &mut app)
            .context("Failed to dispatch events")?;

        app.banner.poll(Instant::now());
        if app.wants_redraw() {
            app.draw();
        }

        if app.should_exit {
            info!("Exiting application");
            break;
        }
    }

    Ok(())
}

/// Get display dimensions from the output state
fn get_display_dimensions(output_state: &OutputState) -> (u32, u32) {
    for output in output_state.outputs() {
        if let Some(info) = output_state.info(&output) {
            if let Some(mode) = info.modes.iter().find(|m| m.current) {
                return (mode.dimensions.0 as u32, mode.dimensions.1 as u32);
            }
            if let Some(mode) = info.modes.first() {
                return (mode.dimensions.0 as u32, mode.dimensions.1 as u32);
            }
        }
    }
    (1920, 1080)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(shade: u8) -> PageImage {
        PageImage {
            width: 1,
            height: 1,
            bgra_data: vec![shade, shade, shade, 255],
        }
    }

    #[test]
    fn banner_starts_on_first_page_with_one_marker_each() {
        let banner = build_banner(vec![page(1), page(2), page(3)], 3000, true);

        assert_eq!(banner.current_index(), Some(0));
        assert_eq!(banner.indicators().selected(), &[true, false, false]);
        assert_eq!(banner.autoplay().interval(), Duration::from_millis(3000));
        assert!(banner.autoplay().is_running());

        let view = banner.surface();
        assert_eq!(view.center.as_deref(), Some(&page(1)));
        assert_eq!(view.left.as_deref(), Some(&page(3)));
        assert_eq!(view.right.as_deref(), Some(&page(2)));
        assert!(!view.is_animating());
    }

    #[test]
    fn autoplay_can_be_disabled() {
        let banner = build_banner(vec![page(1), page(2)], 2000, false);
        assert!(!banner.autoplay().is_running());
    }

    #[test]
    fn navigation_starts_a_transition_and_moves_markers() {
        let mut banner = build_banner(vec![page(1), page(2), page(3)], 2000, false);
        banner.surface_mut().dirty = false;

        banner.navigate(Direction::Previous);

        let view = banner.surface();
        assert!(view.dirty);
        assert_eq!(view.animation.map(|a| a.direction()), Some(Direction::Previous));
        assert_eq!(view.center.as_deref(), Some(&page(3)));
        assert_eq!(banner.indicators().selected(), &[false, false, true]);
    }

    #[test]
    fn pages_are_shared_not_copied() {
        let banner = build_banner(vec![page(7)], 2000, false);
        let view = banner.surface();
        let center = view.center.as_ref().unwrap();
        assert!(Rc::ptr_eq(center, view.left.as_ref().unwrap()));
        assert!(Rc::ptr_eq(center, &banner.pages()[0]));
    }

    fn middle(rect: &layout::Rect) -> (f64, f64) {
        (
            rect.x as f64 + rect.width as f64 / 2.0,
            rect.y as f64 + rect.height as f64 / 2.0,
        )
    }

    fn banner_layout(banner: &Banner) -> BannerLayout {
        let (width, height) = layout::preferred_size();
        BannerLayout::new(width, height, banner.len())
    }

    #[test]
    fn hovering_a_marker_selects_its_page() {
        let mut banner = build_banner(vec![page(1), page(2), page(3)], 2000, false);
        let layout = banner_layout(&banner);

        let (arrows_visible, hovered) =
            route_hover(&layout, &mut banner, Hit::None, middle(&layout.markers[2]));
        assert!(!arrows_visible);
        assert_eq!(hovered, Hit::Marker(2));
        assert_eq!(banner.current_index(), Some(2));
        assert_eq!(banner.indicators().selected(), &[false, false, true]);
    }

    #[test]
    fn hovering_over_the_same_marker_does_not_reselect() {
        let mut banner = build_banner(vec![page(1), page(2), page(3)], 2000, false);
        let layout = banner_layout(&banner);

        route_hover(&layout, &mut banner, Hit::None, middle(&layout.markers[1]));
        banner.navigate(Direction::Next);
        assert_eq!(banner.current_index(), Some(2));

        route_hover(&layout, &mut banner, Hit::Marker(1), middle(&layout.markers[1]));
        assert_eq!(banner.current_index(), Some(2));
    }

    #[test]
    fn hovering_an_arrow_shows_it_without_navigating() {
        let mut banner = build_banner(vec![page(1), page(2)], 2000, false);
        let layout = banner_layout(&banner);

        let (arrows_visible, hovered) =
            route_hover(&layout, &mut banner, Hit::None, middle(&layout.right_arrow));
        assert!(arrows_visible);
        assert_eq!(hovered, Hit::RightArrow);
        assert_eq!(banner.current_index(), Some(0));
    }

    #[test]
    fn release_over_the_pressed_arrow_navigates() {
        let mut banner = build_banner(vec![page(1), page(2), page(3)], 2000, false);
        let layout = banner_layout(&banner);

        let clicked = route_release(
            &layout,
            &mut banner,
            Some(Hit::RightArrow),
            middle(&layout.right_arrow),
            true,
        );
        assert_eq!(clicked, Some(Hit::RightArrow));
        assert_eq!(banner.current_index(), Some(1));
    }

    #[test]
    fn release_over_a_different_element_is_ignored() {
        let mut banner = build_banner(vec![page(1), page(2), page(3)], 2000, false);
        let layout = banner_layout(&banner);

        let clicked = route_release(
            &layout,
            &mut banner,
            Some(Hit::LeftArrow),
            middle(&layout.right_arrow),
            true,
        );
        assert_eq!(clicked, None);
        assert_eq!(banner.current_index(), Some(0));
        assert!(!banner.surface().is_animating());

        let clicked = route_release(&layout, &mut banner, None, middle(&layout.markers[2]), false);
        assert_eq!(clicked, None);
        assert_eq!(banner.current_index(), Some(0));
    }

    #[test]
    fn release_over_a_pressed_marker_selects_it() {
        let mut banner = build_banner(vec![page(1), page(2), page(3)], 2000, false);
        let layout = banner_layout(&banner);

        let clicked = route_release(
            &layout,
            &mut banner,
            Some(Hit::Marker(1)),
            middle(&layout.markers[1]),
            false,
        );
        assert_eq!(clicked, Some(Hit::Marker(1)));
        assert_eq!(banner.current_index(), Some(1));
    }

    #[test]
    fn selecting_a_missing_marker_is_harmless() {
        let mut strip = MarkerStrip::default();
        strip.add_marker();
        strip.select(4, true);
        assert_eq!(strip.selected(), &[false]);
    }
}
