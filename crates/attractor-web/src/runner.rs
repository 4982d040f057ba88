use attractor_engine::bridge::protocol::HEADER_FLOATS;
use attractor_engine::{
    build_render_buffer, Attractor, ControlEvent, ControlLimits, ControlQueue, EngineConfig,
    FixedTimestep, ProtocolLayout, RenderBuffer, SimulationEngine,
};

/// Wires the engine to the browser loop.
///
/// JS pushes control events and calls `tick(dt)` once per animation frame;
/// the runner turns frame time into fixed simulation ticks, then rebuilds the
/// render buffers that JS reads through the pointer accessors.
pub struct SimRunner {
    engine: SimulationEngine,
    attractor: Attractor,
    controls: ControlQueue,
    limits: ControlLimits,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: EngineConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame: u32,
}

impl SimRunner {
    pub fn new(config: EngineConfig) -> Self {
        let engine = SimulationEngine::new(&config);
        let timestep = FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame);
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_dots, config.max_line_vertices);

        Self {
            engine,
            attractor: config.attractor,
            controls: ControlQueue::new(),
            limits: ControlLimits::default(),
            render_buffer,
            timestep,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            frame: 0,
        }
    }

    /// Push a control event; applied at the start of the next frame.
    pub fn push_control(&mut self, event: ControlEvent) {
        self.controls.push(event);
    }

    /// Run one animation frame: apply controls, tick, rebuild buffers.
    pub fn tick(&mut self, dt: f32) {
        self.apply_controls();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.engine.tick(&self.attractor);
        }

        build_render_buffer(&self.engine.snapshot(), self.config.dot_size, &mut self.render_buffer);
        self.frame = self.frame.wrapping_add(1);
        self.header = self
            .layout
            .header(self.frame, &self.render_buffer, &self.config, &self.attractor);
    }

    fn apply_controls(&mut self) {
        if self.controls.is_empty() {
            return;
        }
        let events = self.controls.drain();
        let (params, attractor) = self
            .limits
            .apply(&events, self.engine.next_params(), self.attractor);
        self.engine.configure(params);
        self.attractor = attractor;
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn dots_ptr(&self) -> *const f32 {
        self.render_buffer.dots_ptr()
    }

    pub fn dot_instance_count(&self) -> u32 {
        self.render_buffer.dot_count()
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.render_buffer.lines_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.render_buffer.line_vertex_count()
    }

    // ---- HUD values ----

    pub fn dot_count(&self) -> u32 {
        self.engine.dot_count() as u32
    }

    pub fn target_count(&self) -> u32 {
        self.engine.next_params().target_count as u32
    }

    pub fn path_length(&self) -> u32 {
        self.engine.next_params().path_length as u32
    }

    pub fn gravity_multiplier(&self) -> f32 {
        ControlLimits::gravity_multiplier(self.engine.next_params().gravity)
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn attractor(&self) -> Attractor {
        self.attractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attractor_engine::bridge::protocol::{HEADER_DOT_COUNT, HEADER_FRAME_COUNTER};

    fn config() -> EngineConfig {
        EngineConfig {
            max_spawns_per_tick: None,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn one_frame_at_sixty_hz_runs_one_tick() {
        let mut runner = SimRunner::new(config());
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.dot_count(), 100);
        assert_eq!(runner.dot_instance_count(), 100);
        assert_eq!(runner.header[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(runner.header[HEADER_DOT_COUNT], 100.0);
    }

    #[test]
    fn short_frame_runs_no_tick() {
        let mut runner = SimRunner::new(config());
        runner.tick(0.001);
        assert_eq!(runner.dot_count(), 0);
    }

    #[test]
    fn controls_take_effect_next_frame() {
        let mut runner = SimRunner::new(config());
        runner.push_control(ControlEvent::SetTargetCount(12));
        runner.push_control(ControlEvent::SetPathLength(4));
        assert_eq!(runner.target_count(), 100);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.target_count(), 12);
        assert_eq!(runner.path_length(), 4);
        assert_eq!(runner.dot_count(), 12);
    }

    #[test]
    fn attractor_moves_with_pointer() {
        let mut runner = SimRunner::new(config());
        runner.push_control(ControlEvent::MoveAttractor { x: 100.0, y: 150.0 });
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.attractor().position.x, 100.0);
        assert_eq!(runner.attractor().position.y, 150.0);
    }

    #[test]
    fn gravity_multiplier_reports_default() {
        let runner = SimRunner::new(config());
        assert!((runner.gravity_multiplier() - 1.0).abs() < 1e-6);
    }
}
