// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Herald Sandbox
// Main binary for trying the emitter end to end

use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use herald_core::{args, shared, Emitter, EmitterConfig, Listener};

/// Reads the emitter config from the path in `HERALD_CONFIG`, if set.
fn load_config() -> Result<EmitterConfig> {
    match env::var("HERALD_CONFIG") {
        Ok(path) => EmitterConfig::load(&path)
            .with_context(|| format!("Failed to load emitter config from '{path}'")),
        Err(_) => Ok(EmitterConfig::default()),
    }
}

fn run_scene(emitter: &Emitter) {
    let frames = Arc::new(AtomicU64::new(0));

    let counter = Arc::clone(&frames);
    emitter.on(
        "frame",
        [Listener::new(move |payload| {
            let dt = payload
                .first()
                .and_then(|p| p.downcast_ref::<f32>())
                .copied()
                .unwrap_or_default();
            let frame = counter.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Frame {frame} took {dt:.3}s.");
        })],
    );
    emitter.once(
        "frame",
        [Listener::new(|_| log::info!("First frame rendered."))],
    );
    emitter.on(
        "resize",
        [Listener::new(|payload| {
            match (
                payload.first().and_then(|p| p.downcast_ref::<u32>()),
                payload.get(1).and_then(|p| p.downcast_ref::<u32>()),
            ) {
                (Some(width), Some(height)) => log::info!("Window resized to {width}x{height}."),
                _ => log::warn!("Resize event carried an unexpected payload."),
            }
        })],
    );
    emitter.on(
        "shutdown",
        [Listener::new(|_| panic!("shutdown handler is not ready"))],
    );

    for _ in 0..3 {
        emitter.emit("frame", &args![0.016_f32]);
    }
    emitter.emit("resize", &args![1280_u32, 720_u32]);

    if let Err(e) = emitter.try_emit("shutdown", &[]) {
        log::error!("{e}");
    }

    log::info!(
        "{} frame(s) processed across {} event name(s).",
        frames.load(Ordering::Relaxed),
        emitter.len()
    );
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("Herald sandbox v{}", herald_core::config::VERSION);

    let emitter = Emitter::with_config(load_config()?);
    run_scene(&emitter);

    shared::on(
        "log",
        [Listener::new(|payload| {
            if let Some(line) = payload.first().and_then(|p| p.downcast_ref::<String>()) {
                log::info!("shared: {line}");
            }
        })],
    );
    shared::emit("log", &args![String::from("hello from the shared emitter")]);
    shared::clear();

    Ok(())
}
