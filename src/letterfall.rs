use dioxus::prelude::*;
use rand::Rng;

pub const CANVAS_ID: &str = "letterfall-canvas";
pub const PARTICLE_COUNT: usize = 80;
const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%&*+=?!";
#[cfg(target_arch = "wasm32")]
const FONT: &str = r#"16px "Helvetica Neue", Helvetica, Arial, sans-serif"#;
const MAX_SPEED: f64 = 0.75;
const OPACITY_FLOOR: f64 = 0.3;
const OPACITY_SPAN: f64 = 0.2;
const WRAP_MARGIN: f64 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub glyph: char,
    pub opacity: f64,
}

impl Particle {
    fn random<R: Rng + ?Sized>(width: f64, height: f64, rng: &mut R) -> Self {
        let glyph = GLYPHS[rng.random_range(0..GLYPHS.len())] as char;
        Self {
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
            dx: (rng.random::<f64>() - 0.5) * 2.0 * MAX_SPEED,
            dy: (rng.random::<f64>() - 0.5) * 2.0 * MAX_SPEED,
            glyph,
            opacity: OPACITY_FLOOR + rng.random::<f64>() * OPACITY_SPAN,
        }
    }

    pub fn fill_style(&self) -> String {
        format!("rgba(40, 40, 40, {})", self.opacity)
    }

    fn advance(&mut self, width: f64, height: f64) {
        self.x = wrap(self.x + self.dx, width);
        self.y = wrap(self.y + self.dy, height);
    }
}

fn wrap(position: f64, extent: f64) -> f64 {
    if position < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if position > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        position
    }
}

/// Drifting glyph field behind the page. Pure state; the canvas loop owns
/// drawing and timing.
#[derive(Clone, Debug, PartialEq)]
pub struct Letterfall {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

impl Letterfall {
    pub fn seeded<R: Rng + ?Sized>(width: f64, height: f64, rng: &mut R) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::random(width, height, rng))
            .collect();
        Self {
            width,
            height,
            particles,
        }
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    /// New bounds, new positions; glyphs, velocities and opacities carry over.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width;
        self.height = height;
        for particle in &mut self.particles {
            particle.x = rng.random::<f64>() * width;
            particle.y = rng.random::<f64>() * height;
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

#[component]
pub fn LetterfallCanvas() -> Element {
    #[cfg(target_arch = "wasm32")]
    {
        let mut handle = use_signal(|| None::<browser::LoopHandle>);
        use_effect(move || {
            if handle.peek().is_some() {
                return;
            }
            match browser::start(CANVAS_ID) {
                Ok(started) => {
                    tracing::debug!("letterfall: loop started");
                    handle.set(Some(started));
                }
                Err(message) => tracing::warn!(%message, "letterfall: not started"),
            }
        });
        use_drop(move || {
            if let Some(running) = handle.write().take() {
                running.stop();
            }
        });
    }

    rsx! {
        canvas { id: CANVAS_ID, class: "letterfall-canvas", aria_hidden: "true" }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

    use super::{Letterfall, FONT};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

    pub struct LoopHandle {
        window: Window,
        frame_id: Rc<Cell<Option<i32>>>,
        frame: FrameCallback,
        resize: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl LoopHandle {
        pub fn stop(self) {
            if let Some(id) = self.frame_id.take() {
                let _ = self.window.cancel_animation_frame(id);
            }
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
            // the frame closure holds a clone of its own cell
            self.frame.borrow_mut().take();
        }
    }

    pub fn start(canvas_id: &str) -> Result<LoopHandle, String> {
        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas missing")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "canvas cast failed")?;
        let context = canvas
            .get_context("2d")
            .map_err(|_| "canvas context error")?
            .ok_or("canvas context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "canvas context cast failed".to_string())?;

        let (width, height) = viewport_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let rng = Rc::new(RefCell::new(SmallRng::seed_from_u64(entropy_seed())));
        let field = Rc::new(RefCell::new(Letterfall::seeded(
            width,
            height,
            &mut *rng.borrow_mut(),
        )));

        let frame_id = Rc::new(Cell::new(None));
        let frame: FrameCallback = Rc::new(RefCell::new(None));
        {
            let frame_loop = frame.clone();
            let frame_id = frame_id.clone();
            let window = window.clone();
            let field = field.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                draw(&context, &mut field.borrow_mut());
                if let Some(callback) = frame_loop.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                        frame_id.set(Some(id));
                    }
                }
            }) as Box<dyn FnMut()>));
        }

        let resize = {
            let window = window.clone();
            Closure::wrap(Box::new(move |_event: web_sys::Event| {
                let (width, height) = viewport_size(&window);
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
                field
                    .borrow_mut()
                    .resize(width, height, &mut *rng.borrow_mut());
            }) as Box<dyn FnMut(_)>)
        };
        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|_| "resize listener failed")?;

        let first = frame
            .borrow()
            .as_ref()
            .map(|callback| window.request_animation_frame(callback.as_ref().unchecked_ref()));
        match first {
            Some(Ok(id)) => frame_id.set(Some(id)),
            _ => return Err("requestAnimationFrame failed".to_string()),
        }

        Ok(LoopHandle {
            window,
            frame_id,
            frame,
            resize,
        })
    }

    fn draw(context: &CanvasRenderingContext2d, field: &mut Letterfall) {
        let (width, height) = field.size();
        context.clear_rect(0.0, 0.0, width, height);
        context.set_font(FONT);
        for particle in field.particles() {
            context.set_fill_style_str(&particle.fill_style());
            let _ = context.fill_text(&particle.glyph.to_string(), particle.x, particle.y);
        }
        field.step();
    }

    fn viewport_size(window: &Window) -> (f64, f64) {
        let width = window
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);
        (width, height)
    }

    fn entropy_seed() -> u64 {
        let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
        (noise << 32) ^ js_sys::Date::now() as u64
    }
}
