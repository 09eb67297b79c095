//! Desktop simulator for the attitude compass.
//!
//! Renders the compass dial in an SDL2 window via `embedded-graphics-simulator`.
//! A producer thread plays the platform sensor service: it synthesizes a
//! slowly turning, tilting device and pushes accelerometer and magnetometer
//! readings into the shared sensor channel while the screen is subscribed.
//!
//! # Key bindings
//!
//! | Key   | Action                                   |
//! |-------|------------------------------------------|
//! | 0-3   | Recreate the screen at 0/90/180/270°     |
//! | Space | Pause / resume sensor delivery           |
//! | Q     | Quit                                     |

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{debug, info, trace};
use nalgebra::{Rotation3, Vector3};

use compass_core::dial::CompassDirection;
use compass_core::render::{Framebuffer, RasterSurface};
use compass_core::sensors::{
    SENSOR_EVENTS, SensorEvent, SensorKind, SensorSubscription, VectorSource,
};
use compass_core::{CompassScreen, DialStyle, NoAccessibility, ScreenRotation, SensorError};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Simulated panel size; the dial is square.
const DISPLAY_SIZE_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Interval between synthetic sensor readings (~50 Hz per sensor).
const SENSOR_INTERVAL: Duration = Duration::from_millis(20);

// ---------------------------------------------------------------------------
// Synthetic sensor service
// ---------------------------------------------------------------------------

/// Earth field in world coordinates (x east, y north, z up), µT.
const EARTH_FIELD_UT: [f32; 3] = [0.0, 22.0, -42.0];

const STANDARD_GRAVITY: f32 = 9.80665;

const ACCEL_BIT: u8 = 1 << 0;
const MAG_BIT: u8 = 1 << 1;

fn sensor_bit(kind: SensorKind) -> u8 {
    match kind {
        SensorKind::Accelerometer => ACCEL_BIT,
        SensorKind::MagneticField => MAG_BIT,
    }
}

/// Handle to the simulated sensor service; clones share registration state.
#[derive(Clone, Default)]
struct MotionSource {
    registered: Arc<AtomicU8>,
}

impl VectorSource for MotionSource {
    fn register(&mut self, kind: SensorKind) -> Result<(), SensorError> {
        self.registered.fetch_or(sensor_bit(kind), Ordering::SeqCst);
        debug!("Registered {:?}", kind);
        Ok(())
    }

    fn unregister_all(&mut self) {
        self.registered.store(0, Ordering::SeqCst);
        debug!("Unregistered all sensors");
    }
}

/// Device motion: a steady clockwise turn with gentle pitch and roll swings.
struct MotionModel {
    elapsed_secs: f32,
}

impl MotionModel {
    fn new() -> Self {
        Self { elapsed_secs: 0.0 }
    }

    /// Advance the clock and return the device-to-world rotation.
    fn next_attitude(&mut self, dt_secs: f32) -> Rotation3<f32> {
        self.elapsed_secs += dt_secs;
        let t = self.elapsed_secs;

        let heading = (t * 15.0).to_radians();
        let pitch = (25.0 * (t / 3.0).sin()).to_radians();
        let roll = (35.0 * (t / 5.0).sin()).to_radians();

        // Heading is clockwise from north, the opposite sense of yaw about up.
        Rotation3::from_euler_angles(pitch, roll, -heading)
    }
}

/// Spawn the thread that feeds `SENSOR_EVENTS` while sensors are registered.
fn spawn_sensor_service(source: MotionSource, running: Arc<AtomicBool>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut model = MotionModel::new();
        let gravity = Vector3::new(0.0, 0.0, STANDARD_GRAVITY);
        let field = Vector3::from(EARTH_FIELD_UT);

        while running.load(Ordering::SeqCst) {
            let to_device = model.next_attitude(SENSOR_INTERVAL.as_secs_f32()).inverse();
            let mask = source.registered.load(Ordering::SeqCst);

            let readings = [
                (SensorKind::Accelerometer, to_device * gravity),
                (SensorKind::MagneticField, to_device * field),
            ];
            for (kind, values) in readings {
                if mask & sensor_bit(kind) == 0 {
                    continue;
                }
                if SENSOR_EVENTS.try_send(SensorEvent::new(kind, values)).is_err() {
                    trace!("Sensor channel full, dropping {:?}", kind);
                }
            }

            thread::sleep(SENSOR_INTERVAL);
        }
    })
}

// ---------------------------------------------------------------------------
// Screen helpers
// ---------------------------------------------------------------------------

/// Map an SDL keycode to a screen rotation.
fn keycode_to_rotation(keycode: Keycode) -> Option<ScreenRotation> {
    match keycode {
        Keycode::Num0 | Keycode::Kp0 => Some(ScreenRotation::Rotation0),
        Keycode::Num1 | Keycode::Kp1 => Some(ScreenRotation::Rotation90),
        Keycode::Num2 | Keycode::Kp2 => Some(ScreenRotation::Rotation180),
        Keycode::Num3 | Keycode::Kp3 => Some(ScreenRotation::Rotation270),
        _ => None,
    }
}

fn create_screen(rotation: ScreenRotation) -> CompassScreen<NoAccessibility> {
    CompassScreen::new(rotation, DialStyle::default(), NoAccessibility)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting compass simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_SIZE_PX, DISPLAY_SIZE_PX, WINDOW_SCALE
    );
    info!("Keys: 0-3=Screen rotation  Space=Pause/Resume  Q=Quit");

    // SDL2 display and window
    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_SIZE_PX, DISPLAY_SIZE_PX));

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Compass Simulator", &output_settings);

    let mut framebuffer = Framebuffer::new(DISPLAY_SIZE_PX, DISPLAY_SIZE_PX);

    // Sensor service
    let source = MotionSource::default();
    let running = Arc::new(AtomicBool::new(true));
    let service = spawn_sensor_service(source.clone(), Arc::clone(&running));

    let mut screen = create_screen(ScreenRotation::Rotation0);
    let mut subscription: Option<SensorSubscription<MotionSource>> =
        Some(screen.resume(source.clone()));
    let mut last_direction: Option<CompassDirection> = None;

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    if keycode == Keycode::Space {
                        match subscription.take() {
                            Some(active) => {
                                info!("Pausing sensors");
                                active.pause();
                            }
                            None => {
                                info!("Resuming sensors");
                                subscription = Some(screen.resume(source.clone()));
                            }
                        }
                    }

                    if let Some(rotation) = keycode_to_rotation(keycode) {
                        info!("Recreating screen at {}°", rotation.degrees());
                        let was_active = subscription.take().is_some();
                        // Stale readings belong to the old screen.
                        while SENSOR_EVENTS.try_receive().is_ok() {}
                        screen = create_screen(rotation);
                        if was_active {
                            subscription = Some(screen.resume(source.clone()));
                        }
                    }
                }

                _ => {}
            }
        }

        // --- Sensor events ------------------------------------------------
        let applied = screen.drain(&SENSOR_EVENTS);
        if applied > 0 {
            trace!("Applied {} sensor events", applied);
            let direction = CompassDirection::nearest(screen.view().bearing());
            if last_direction != Some(direction) {
                info!("Heading {} ({:.1}°)", direction, screen.view().bearing());
                last_direction = Some(direction);
            }
        }

        // --- Render -------------------------------------------------------
        if screen.view().is_dirty() {
            let _ = framebuffer.clear(Rgb565::BLACK);
            screen.view().draw(&mut RasterSurface::new(&mut framebuffer));
            screen.view_mut().mark_clean();
            if let Err(e) = framebuffer.flush(&mut display, Point::zero()) {
                log::error!("Flush error: {:?}", e);
            }
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    drop(subscription);
    running.store(false, Ordering::SeqCst);
    if service.join().is_err() {
        log::error!("Sensor service thread panicked");
    }

    info!("Simulator exiting");
}
