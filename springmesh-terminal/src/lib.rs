/// Terminal driver for the spring mesh simulation
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use springmesh_core::{Camera, Mesh, Simulator, StepReport};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod input;
pub mod presets;
pub mod renderer;

pub use input::{map_event, Command};
pub use renderer::AsciiRenderer;

/// Redraw period, independent of the simulation tick
const FRAME_TIME: Duration = Duration::from_millis(1000 / 30);
/// Ticks run back to back before the schedule is reset
const MAX_CATCH_UP: u32 = 10;

/// Main application struct: owns the mesh, the simulator and the camera,
/// steps the simulation on a fixed period and draws between ticks.
pub struct TerminalApp {
    mesh: Mesh,
    simulator: Simulator,
    camera: Camera,
    renderer: AsciiRenderer,
    tick: Duration,
    running: bool,
    paused: bool,
    ticks: u64,
    last_report: StepReport,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(
        mesh: Mesh,
        simulator: Simulator,
        camera: Camera,
        tick: Duration,
        (width, height): (u16, u16),
    ) -> Self {
        Self {
            mesh,
            simulator,
            camera,
            // top row is the status line
            renderer: AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize),
            tick,
            running: true,
            paused: false,
            ticks: 0,
            last_report: StepReport::default(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut next_tick = Instant::now();
        let mut next_frame = Instant::now();

        while self.running {
            let wait = next_tick.min(next_frame).saturating_duration_since(Instant::now());
            if event::poll(wait)? {
                self.handle_event(event::read()?);
            }

            let mut caught_up = 0;
            while Instant::now() >= next_tick {
                self.update();
                next_tick += self.tick;
                caught_up += 1;
                if caught_up == MAX_CATCH_UP {
                    log::warn!("simulation fell behind; skipping ahead");
                    next_tick = Instant::now() + self.tick;
                }
            }

            if Instant::now() >= next_frame {
                self.render()?;
                next_frame = Instant::now() + FRAME_TIME;
                self.frame_count += 1;
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Resize(width, height) = event {
            self.renderer
                .resize(width as usize, height.saturating_sub(1) as usize);
            return;
        }
        if let Some(command) = map_event(&event) {
            self.apply(command);
        }
    }

    /// Carry out a command between ticks. Camera commands that cannot be
    /// derived are logged and leave the view unchanged.
    pub fn apply(&mut self, command: Command) {
        let result = match command {
            Command::Quit => {
                self.running = false;
                Ok(())
            }
            Command::TogglePause => {
                self.paused = !self.paused;
                Ok(())
            }
            Command::Zoom(direction) => self.camera.zoom(direction),
            Command::Yaw(direction) => self.camera.adjust_yaw(direction),
            Command::Roll(direction) => self.camera.adjust_roll(direction),
            Command::Pitch(direction) => self.camera.adjust_pitch(direction),
        };
        if let Err(e) = result {
            log::warn!("ignoring {:?}: {}", command, e);
        }
    }

    /// Advance the simulation by one tick unless paused.
    pub fn update(&mut self) {
        if self.paused {
            return;
        }
        self.last_report = self.simulator.step(&mut self.mesh);
        self.ticks += 1;
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        // Render mesh
        self.renderer.render_mesh(&self.mesh, &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let params = self.camera.params();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "springmesh | tick {} | edge error {:.4} | side {:.2} pitch {} yaw {} roll {} | FPS {:.1}{} | click/shift-click=zoom arrows=yaw/roll w/s=pitch space=pause q=quit",
                self.ticks,
                self.last_report.mean_abs_deviation,
                params.side,
                params.pitch,
                params.yaw,
                params.roll,
                self.fps,
                if self.paused { " | paused" } else { "" },
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
