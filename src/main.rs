//! Brick Breaker headless host
//!
//! Runs the frame loop without a window: input comes from the demo player (or
//! nobody), draws are recorded into a `DrawList`, and music goes to a null
//! device. Prints the final report as JSON.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use brick_breaker::Settings;
use brick_breaker::audio::{BackgroundMusic, NullDevice, PcmFileTrack, SilentTrack, TrackDecoder};
use brick_breaker::autopilot::Autopilot;
use brick_breaker::clock::FrameClock;
use brick_breaker::input::{InputSampler, KeyState};
use brick_breaker::renderer::{DrawList, MeshCatalog, render_frame};
use brick_breaker::sim::{GameState, Step, tick};

type Music = BackgroundMusic<Box<dyn TrackDecoder>, NullDevice>;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn open_music(settings: &Settings) -> Result<Music> {
    let track: Box<dyn TrackDecoder> = match &settings.music_track {
        Some(path) => Box::new(PcmFileTrack::open(path).context("starting background music")?),
        None => Box::new(SilentTrack),
    };
    let device = NullDevice::open(settings.sample_rate).context("opening audio output")?;

    let mut music = BackgroundMusic::new(track, device);
    music.set_master_volume(settings.master_volume);
    music.set_music_volume(settings.music_volume);
    music.set_muted(settings.muted);
    Ok(music)
}

fn run() -> Result<()> {
    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Brick Breaker starting (seed {})", seed);

    let mut music = open_music(&settings)?;
    let catalog = MeshCatalog::new();
    log::debug!("Mesh catalog ready ({} bytes)", catalog.byte_len());

    let mut state = GameState::new(seed);
    let mut clock = FrameClock::new(settings.timestep);
    let mut sampler = InputSampler::new();
    let mut pilot = settings.autopilot.then(Autopilot::new);
    let mut frame = DrawList::new();
    let budget = clock.frame_budget();

    let mut frames: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = if settings.realtime {
            frame_start.duration_since(last).as_secs_f32()
        } else {
            budget.as_secs_f32()
        };
        last = frame_start;

        let keys = match pilot.as_mut() {
            Some(pilot) => pilot.keys(&state),
            None => KeyState::new(),
        };
        if InputSampler::quit_requested(&keys) {
            log::info!("Quit requested");
            break;
        }
        if !keys.is_empty() {
            sampler.key_event(&keys);
        }

        let mut finished = false;
        for _ in 0..clock.ticks_for_frame(dt) {
            let input = sampler.sample(&keys);
            if let Step::Finished(cause) = tick(&mut state, &input) {
                log::info!("Game over: {:?}", cause);
                finished = true;
                break;
            }
        }
        for event in state.drain_events() {
            if event.is_scoring() {
                log::debug!("{:?}", event);
            } else {
                log::trace!("{:?}", event);
            }
        }

        render_frame(&state, &mut frame);
        music.pump();
        frames += 1;

        if finished {
            break;
        }
        if settings.max_frames.is_some_and(|max| frames >= max) {
            log::info!("Frame limit reached after {} frames", frames);
            break;
        }
        if settings.realtime {
            let elapsed = frame_start.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            } else if elapsed > budget + Duration::from_millis(50) {
                log::debug!("Slow frame: {:?}", elapsed);
            }
        }
    }

    let (_, device) = music.shutdown();
    log::debug!(
        "Music output: {} bytes at {} Hz",
        device.bytes_played(),
        device.sample_rate()
    );

    let report = serde_json::to_string(&state.report()).context("serializing final report")?;
    log::info!("Final report: {}", report);
    println!("{}", report);
    Ok(())
}
