use std::time::{Duration, Instant};

use emu8_core::{Chip8, Step, TIMER_SPEED};

/// How the host loop paces and feeds the interpreter
#[derive(Clone, Debug)]
pub struct Settings {
    /// Instructions executed per second
    pub ips: u32,
    /// Stop after this many instructions
    pub max_cycles: Option<u64>,
    /// Keys handed to the program, in order, each time it waits for one
    pub presses: Vec<u8>,
    /// Ignore the wall clock and run as fast as possible
    pub fast_forward: bool,
}

/// Why the host loop stopped
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    Halted,
    CycleLimit,
    OutOfKeys,
}

#[derive(Copy, Clone, Debug)]
pub struct Outcome {
    pub reason: StopReason,
    pub cycles: u64,
    pub frames: u64,
}

/// Drives `chip8` until it halts, runs out of scripted keys, or hits the cycle limit.
///
/// CPU steps, timer ticks and display refreshes each run off their own accumulator so the
/// 60Hz timers keep their rate whatever the instruction rate is.
pub fn run(chip8: &mut Chip8, settings: &Settings) -> emu8_core::Result<Outcome> {
    let cpu_interval = Duration::from_secs_f64(1.0 / f64::from(settings.ips));
    let timer_interval = Duration::from_secs_f64(1.0 / f64::from(TIMER_SPEED));
    let display_interval = timer_interval;

    let mut presses = settings.presses.iter().copied();
    let mut cycles: u64 = 0;
    let mut frames: u64 = 0;

    let mut cpu_accumulator = Duration::ZERO;
    let mut timer_accumulator = Duration::ZERO;
    let mut display_accumulator = Duration::ZERO;
    let mut last_cycle = Instant::now();

    let reason = 'event: loop {
        // Fast forward advances a simulated clock by exactly one instruction per pass
        let elapsed = if settings.fast_forward {
            cpu_interval
        } else {
            let current_time = Instant::now();
            let elapsed = current_time - last_cycle;
            last_cycle = current_time;
            elapsed
        };
        cpu_accumulator += elapsed;
        timer_accumulator += elapsed;
        display_accumulator += elapsed;

        // CPU
        while cpu_accumulator >= cpu_interval {
            cpu_accumulator -= cpu_interval;
            if settings.max_cycles.map_or(false, |max| cycles >= max) {
                break 'event StopReason::CycleLimit;
            }
            match chip8.step()? {
                Step::Executed(_) => cycles += 1,
                Step::AwaitingKey => match presses.next() {
                    Some(key) => {
                        log::info!("pressing key {:X}", key);
                        chip8.key_press(key);
                        chip8.key_release(key);
                    }
                    None => break 'event StopReason::OutOfKeys,
                },
                Step::Halted => break 'event StopReason::Halted,
            }
        }

        // Timers
        while timer_accumulator >= timer_interval {
            timer_accumulator -= timer_interval;
            chip8.tick_timers();
        }

        // Display
        while display_accumulator >= display_interval {
            display_accumulator -= display_interval;
            if let Some(frame) = chip8.take_frame() {
                frames += 1;
                log::debug!("frame {} with {} lit pixels", frames, frame.lit_pixels());
            }
        }

        if !settings.fast_forward {
            std::thread::sleep(Duration::from_millis(1));
        }
    };

    log::info!("stopped after {} instructions: {:?}", cycles, reason);
    Ok(Outcome {
        reason,
        cycles,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn settings() -> Settings {
        Settings {
            ips: 600,
            max_cycles: None,
            presses: Vec::new(),
            fast_forward: true,
        }
    }

    fn chip8_with(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::default();
        chip8.load_rom(&mut Cursor::new(program.to_vec())).unwrap();
        chip8
    }

    #[test]
    fn test_runs_until_halt() {
        let mut chip8 = chip8_with(&[0x60, 0x01, 0x61, 0x02]);
        let outcome = run(&mut chip8, &settings()).unwrap();
        assert_eq!(outcome.reason, StopReason::Halted);
        assert_eq!(outcome.cycles, 2);
        assert_eq!(chip8.state().v[0x1], 0x2);
    }

    #[test]
    fn test_stops_at_cycle_limit() {
        // JP 0x200
        let mut chip8 = chip8_with(&[0x12, 0x00]);
        let settings = Settings {
            max_cycles: Some(100),
            ..settings()
        };
        let outcome = run(&mut chip8, &settings).unwrap();
        assert_eq!(outcome.reason, StopReason::CycleLimit);
        assert_eq!(outcome.cycles, 100);
    }

    #[test]
    fn test_max_cycles_zero() {
        let mut chip8 = chip8_with(&[0x12, 0x00]);
        let settings = Settings {
            max_cycles: Some(0),
            ..settings()
        };
        let outcome = run(&mut chip8, &settings).unwrap();
        assert_eq!(outcome.reason, StopReason::CycleLimit);
        assert_eq!(outcome.cycles, 0);
        assert_eq!(chip8.state().pc, 0x200);
    }

    #[test]
    fn test_timers_tick_at_their_own_rate() {
        // LD V0, 0x3C; LD DT, V0; JP 0x204
        let mut chip8 = chip8_with(&[0x60, 0x3C, 0xF0, 0x15, 0x12, 0x04]);
        let settings = Settings {
            max_cycles: Some(302),
            ..settings()
        };
        run(&mut chip8, &settings).unwrap();
        // 300 instructions at 600Hz is half a second, or 30 ticks at 60Hz
        let delay = chip8.state().delay_timer;
        assert!((29..=31).contains(&delay), "delay timer was {}", delay);
    }

    #[test]
    fn test_feeds_scripted_keys() {
        // LD V2, K
        let mut chip8 = chip8_with(&[0xF2, 0x0A]);
        let settings = Settings {
            presses: vec![0xB],
            ..settings()
        };
        let outcome = run(&mut chip8, &settings).unwrap();
        assert_eq!(outcome.reason, StopReason::Halted);
        assert_eq!(chip8.state().v[0x2], 0xB);
    }

    #[test]
    fn test_stops_when_out_of_keys() {
        let mut chip8 = chip8_with(&[0xF2, 0x0A]);
        let outcome = run(&mut chip8, &settings()).unwrap();
        assert_eq!(outcome.reason, StopReason::OutOfKeys);
    }

    #[test]
    fn test_counts_frames() {
        // DRW V0, V0, 5; JP 0x202
        let mut chip8 = chip8_with(&[0xD0, 0x05, 0x12, 0x02]);
        let settings = Settings {
            max_cycles: Some(20),
            ..settings()
        };
        let outcome = run(&mut chip8, &settings).unwrap();
        assert_eq!(outcome.frames, 1);
        assert_eq!(chip8.frame_buffer().lit_pixels(), 14);
        assert!(!chip8.needs_redraw());
    }

    #[test]
    fn test_surfaces_stack_errors() {
        let mut chip8 = chip8_with(&[0x00, 0xEE]);
        let result = run(&mut chip8, &settings());
        assert!(matches!(
            result,
            Err(emu8_core::Error::StackUnderflow { .. })
        ));
    }
}
