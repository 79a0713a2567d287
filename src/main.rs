#![allow(clippy::too_many_lines)] // main() is long but well-structured

//! Storyboard preview window for the device LCD flows.
//!
//! Shows the 160x80 LCD inside a device mockup with its status LED and power
//! button, the active step's title and explanation, and prev/next controls.
//! A second page (`J`) shows frame metrics and the transition journal.
//!
//! ```text
//! cargo run --features window -- firmwareUpdate
//! ```
//!
//! The optional argument picks the initial flow; unknown ids fall back to
//! `power`. Set `RUST_LOG=debug` to see timer and input events.
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `Space` / click `PWR` | Power button (hold 2 s in `power` to shut down) |
//! | `Left` / `Right` / click | Previous / next step |
//! | `Tab` | Next flow (`Shift+Tab` previous) |
//! | `1`-`8` | Select flow by position |
//! | `W` `S` / `A` `D` | Pitch / roll the simulated device |
//! | `R` | Level the device |
//! | `U` | Companion firmware progress +10% |
//! | `C` | Toggle charger |
//! | `J` | Toggle journal page |
//! | `Escape` | Quit |
//!
//! Key repeat is ignored, so holding `Space` is one long press.

use std::{env, thread, time::Instant};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use embedded_graphics_simulator::{
    OutputSettingsBuilder,
    SimulatorDisplay,
    SimulatorEvent,
    Window,
    sdl2::{Keycode, Mod, MouseButton},
};
use lcd_storyboard::{
    DisplaySurface,
    Navigator,
    PowerEvent,
    RecordingSurface,
    colors::BLACK,
    config::{FRAME_TIME, LCD_AREA, LCD_HEIGHT, LCD_WIDTH, PREVIEW_HEIGHT, PREVIEW_WIDTH, WINDOW_SCALE},
    flags::Orientation,
    pages::Page,
    profiling::FrameMetrics,
    render::{ChromeState, ControlsKey},
    screens::{BUILTIN_FLOWS, draw_journal_page, power},
    widgets::{ControlHit, LedWidget, draw_controls, draw_device_frame, draw_header, draw_step_text, hit_test},
};

/// Degrees per `W`/`A`/`S`/`D` press.
const TILT_STEP: f32 = 5.0;

/// Firmware progress per `U` press.
const PROGRESS_STEP: f32 = 0.1;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let requested = env::args().nth(1).unwrap_or_else(|| power::FLOW_ID.to_owned());
    let mut navigator = match Navigator::builtin(&requested) {
        Ok(navigator) => navigator,
        Err(err) => {
            log::warn!("{err}, starting with `{}`", power::FLOW_ID);
            match Navigator::builtin(power::FLOW_ID) {
                Ok(navigator) => navigator,
                Err(err) => {
                    log::error!("no built-in flows: {err}");
                    return;
                }
            }
        }
    };

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(PREVIEW_WIDTH, PREVIEW_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("LCD Storyboard", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    // ==========================================================================
    // Main Loop State
    // ==========================================================================

    // Host frame counter, drives the LED widget independently of step ticks
    let mut frame_count = 0u32;

    let mut chrome = ChromeState::new();
    let mut led_widget = LedWidget::new();
    let mut metrics = FrameMetrics::new();

    let mut current_page = Page::default();
    let mut page_just_switched = false;

    // Mouse press that started on the power button
    let mut mouse_power_held = false;

    // Receives the LCD while the journal page covers it
    let mut hidden_lcd = RecordingSurface::new(Size::new(LCD_WIDTH, LCD_HEIGHT));

    log::info!(
        "storyboard started in `{}`, {} flows",
        navigator.current_flow().id,
        BUILTIN_FLOWS.len()
    );

    // ==========================================================================
    // Main Render Loop
    // ==========================================================================

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown {
                    keycode, keymod, repeat, ..
                } => {
                    // Ignore OS key repeat: a held power key is one press
                    if repeat {
                        continue;
                    }
                    let shift = keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD);
                    match keycode {
                        Keycode::ESCAPE => return,
                        Keycode::SPACE => navigator.handle_power(PowerEvent::PressStart, Instant::now()),
                        Keycode::RIGHT => {
                            navigator.next();
                        }
                        Keycode::LEFT => {
                            navigator.prev();
                        }
                        Keycode::TAB => {
                            navigator.cycle_flow(!shift);
                        }
                        Keycode::W => navigator.nudge_orientation(0.0, TILT_STEP),
                        Keycode::S => navigator.nudge_orientation(0.0, -TILT_STEP),
                        Keycode::A => navigator.nudge_orientation(-TILT_STEP, 0.0),
                        Keycode::D => navigator.nudge_orientation(TILT_STEP, 0.0),
                        Keycode::R => navigator.set_orientation(Orientation::LEVEL),
                        Keycode::U => {
                            let progress = navigator.flags().firmware_progress + PROGRESS_STEP;
                            navigator.set_firmware_progress(progress);
                        }
                        Keycode::C => {
                            let connected = !navigator.flags().charger_connected;
                            navigator.set_charger_connected(connected);
                        }
                        Keycode::J => {
                            current_page = current_page.toggle();
                            page_just_switched = true;
                            log::debug!("page: {current_page:?}");
                        }
                        other => {
                            if let Some(position) = flow_key(other) {
                                navigator.select_flow_at(position);
                            }
                        }
                    }
                }
                SimulatorEvent::KeyUp {
                    keycode: Keycode::SPACE,
                    ..
                } => navigator.handle_power(PowerEvent::PressEnd, Instant::now()),
                SimulatorEvent::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    point,
                } if current_page == Page::Storyboard => match hit_test(point) {
                    Some(ControlHit::Power) => {
                        mouse_power_held = true;
                        navigator.handle_power(PowerEvent::PressStart, Instant::now());
                    }
                    Some(ControlHit::Prev) => {
                        navigator.prev();
                    }
                    Some(ControlHit::Next) => {
                        navigator.next();
                    }
                    None => {}
                },
                SimulatorEvent::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } if mouse_power_held => {
                    mouse_power_held = false;
                    navigator.handle_power(PowerEvent::PressEnd, Instant::now());
                }
                SimulatorEvent::MouseMove { point } if mouse_power_held && hit_test(point) != Some(ControlHit::Power) => {
                    mouse_power_held = false;
                    navigator.handle_power(PowerEvent::PressCancel, Instant::now());
                }
                _ => {}
            }
        }

        // Shutdown countdown runs on wall-clock time
        navigator.poll(Instant::now());

        if page_just_switched {
            display.clear(BLACK).ok();
            chrome.mark_display_cleared();
            led_widget.invalidate();
        }

        match current_page {
            Page::Storyboard => {
                // ==============================================================
                // Storyboard Page: LCD in its bezel, then the chrome around it
                // ==============================================================
                if chrome.need_frame() {
                    draw_device_frame(&mut display);
                    navigator.request_redraw();
                }

                let lcd_drawn = {
                    let mut lcd = display.cropped(&LCD_AREA);
                    let mut surface = DisplaySurface::new(&mut lcd);
                    navigator.tick(&mut surface)
                };
                if lcd_drawn {
                    metrics.inc_lcd_frames();
                }

                let flow = *navigator.current_flow();
                if chrome.check_header_dirty(flow.id, navigator.position(), metrics.fps()) {
                    draw_header(&mut display, &flow.label(), navigator.position(), metrics.fps());
                    metrics.inc_chrome_redraws();
                }

                if chrome.check_step_dirty(flow.id, navigator.current_index()) {
                    let step = navigator.current_step();
                    draw_step_text(&mut display, step.title, step.explanation);
                    metrics.inc_chrome_redraws();
                }

                let controls = ControlsKey {
                    can_prev: navigator.can_prev(),
                    can_next: navigator.can_next(),
                    power_pressed: navigator.power_pressed(),
                    power_hint: navigator.power_hint_visible(),
                };
                if chrome.check_controls_dirty(controls) {
                    draw_controls(&mut display, controls);
                    metrics.inc_chrome_redraws();
                }

                if led_widget.update(navigator.led(), frame_count) {
                    led_widget.draw(&mut display, navigator.led());
                    metrics.inc_led_redraws();
                }

                chrome.end_frame();
            }

            Page::Journal => {
                // ==============================================================
                // Journal Page: the flow keeps running behind it
                // ==============================================================
                if navigator.tick(&mut hidden_lcd) {
                    metrics.inc_lcd_frames();
                }
                hidden_lcd.take();

                draw_journal_page(&mut display, &metrics, navigator.journal(), navigator.transitions());
            }
        }

        // ======================================================================
        // Frame Timing and Profiling
        // ======================================================================

        let render_time = frame_start.elapsed();
        page_just_switched = false;

        window.update(&display);
        frame_count = frame_count.wrapping_add(1);

        // Sleep to hold the tick rate
        let pre_sleep = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(pre_sleep) {
            thread::sleep(remaining);
        }
        let sleep_time = frame_start.elapsed().saturating_sub(pre_sleep);

        metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
    }
}

/// Flow position selected by a number key (`1` selects the first flow).
const fn flow_key(keycode: Keycode) -> Option<usize> {
    match keycode {
        Keycode::NUM_1 => Some(0),
        Keycode::NUM_2 => Some(1),
        Keycode::NUM_3 => Some(2),
        Keycode::NUM_4 => Some(3),
        Keycode::NUM_5 => Some(4),
        Keycode::NUM_6 => Some(5),
        Keycode::NUM_7 => Some(6),
        Keycode::NUM_8 => Some(7),
        _ => None,
    }
}
