//! Procedural glitch renderer for the loading screen.
//!
//! Renders the site wordmark once onto an off-screen master bitmap, then runs
//! an unbounded frame loop: clear the visible surface and copy every master
//! row back with an independently sampled horizontal displacement. The loop
//! reschedules itself through an [`AnimationScheduler`], draws nothing after
//! [`stop`](GlitchRenderer::stop), and degrades to a silent no-op when the
//! host has no drawing surface to offer.

use parking_lot::Mutex;
use rand::Rng;
use std::sync::Arc;

use crate::config::GlitchConfig;
use crate::scheduler::{AnimationScheduler, FramePump};
use crate::surface::{DrawSurface, RenderSurface, TextRasterizer};

/// Procedural distortion renderer bound to one visible surface.
pub struct GlitchRenderer {
    inner: Arc<Mutex<Inner>>,
    scheduler: AnimationScheduler,
}

struct Inner {
    config: GlitchConfig,
    /// None when the host could not provide a surface; the renderer is then a
    /// permanent no-op for this mount.
    mounted: Option<Mounted>,
    running: bool,
}

struct Mounted {
    surface: RenderSurface,
    target: Box<dyn DrawSurface>,
}

impl GlitchRenderer {
    /// Prepare the master bitmap and size the visible surface.
    ///
    /// Passing `None` for `target`, or a rasterizer that fails, yields an
    /// inert renderer: `start` and `stop` become no-ops and no error
    /// propagates to the host page.
    pub fn mount(
        mut config: GlitchConfig,
        raster: &dyn TextRasterizer,
        target: Option<Box<dyn DrawSurface>>,
        pump: Arc<dyn FramePump>,
    ) -> Self {
        config.validate();

        let mounted = match target {
            Some(mut target) => match RenderSurface::prepare(raster, &config) {
                Ok(surface) => {
                    target.resize(surface.width(), surface.height());
                    Some(Mounted { surface, target })
                }
                Err(err) => {
                    log::debug!("[GLITCH] master render failed, loader inert: {}", err);
                    None
                }
            },
            None => {
                log::debug!("[GLITCH] no drawing surface, loader inert");
                None
            }
        };

        Self {
            inner: Arc::new(Mutex::new(Inner {
                config,
                mounted,
                running: false,
            })),
            scheduler: AnimationScheduler::new(pump),
        }
    }

    /// Start the frame loop. The first frame is drawn synchronously; each
    /// frame schedules exactly one successor. Starting a running renderer is
    /// a no-op.
    pub fn start(&self) {
        {
            let mut inner = self.inner.lock();
            if inner.mounted.is_none() || inner.running {
                return;
            }
            inner.running = true;
        }
        log::debug!("[GLITCH] frame loop started");
        Self::frame(Arc::clone(&self.inner), self.scheduler.clone(), 0.0);
    }

    /// Stop the loop and cancel the pending frame. Synchronous: once this
    /// returns no further frame executes. Safe to call repeatedly.
    pub fn stop(&self) {
        let was_running = {
            let mut inner = self.inner.lock();
            std::mem::replace(&mut inner.running, false)
        };
        self.scheduler.cancel();
        if was_running {
            log::debug!("[GLITCH] frame loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock().running
    }

    /// Visible surface dimensions, or None for an inert renderer.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let inner = self.inner.lock();
        inner
            .mounted
            .as_ref()
            .map(|m| (m.surface.width(), m.surface.height()))
    }

    /// One unit of work: draw every displaced row, then schedule the next
    /// frame. Never re-entered; the scheduler holds at most one pending
    /// callback.
    fn frame(state: Arc<Mutex<Inner>>, scheduler: AnimationScheduler, _timestamp: f64) {
        {
            let mut inner = state.lock();
            if !inner.running {
                return;
            }
            let spread = f64::from(inner.config.intensity) * f64::from(inner.config.fuzz_range);
            let Some(mounted) = inner.mounted.as_mut() else {
                return;
            };

            mounted.target.clear();
            let mut rng = rand::thread_rng();
            for row in 0..mounted.surface.height() {
                let dx = ((rng.gen::<f64>() - 0.5) * spread).floor() as i32;
                mounted.target.blit_row(mounted.surface.master(), row, dx);
            }
        }

        let next_state = Arc::clone(&state);
        let next_scheduler = scheduler.clone();
        scheduler.schedule(Box::new(move |timestamp| {
            Self::frame(next_state, next_scheduler, timestamp);
        }));
    }
}
