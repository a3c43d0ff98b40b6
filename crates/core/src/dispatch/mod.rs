use std::{
    sync::mpsc::RecvTimeoutError,
    thread,
    time::{Duration, Instant},
};

use crate::{
    AppConfig, Chain, Command, CommandReceiver, Pattern, PatternConfig, PatternKind, Renderer,
    Result, Settings,
};

/// Effect of a command on the running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The active pattern was replaced and starts from its first frame.
    Restarted,
    /// Settings changed; the current pattern carries on.
    Adjusted,
}

/// Drives the active pattern, renders every frame and applies incoming
/// commands between ticks.
///
/// The dispatcher owns the chain and settings outright. Producers only ever
/// reach it through the command channel, and waiting on that channel is the
/// only place the loop blocks.
pub struct Dispatcher<R> {
    chain: Chain,
    settings: Settings,
    patterns: PatternConfig,
    active: PatternKind,
    pattern: Box<dyn Pattern>,
    commands: CommandReceiver,
    renderer: R,
    disconnected: bool,
}

impl<R: Renderer> Dispatcher<R> {
    /// Starts on the configured default pattern. Fails if that name is not
    /// registered.
    pub fn new(
        chain: Chain,
        config: &AppConfig,
        commands: CommandReceiver,
        mut renderer: R,
    ) -> Result<Self> {
        let active = PatternKind::from_name(&config.engine.default_pattern)?;
        let settings = config.engine.initial_settings();
        let pattern = active.instantiate(&config.patterns, &chain);
        renderer.set_brightness(settings.brightness);

        tracing::info!(pattern = %active, pixels = chain.len(), "dispatcher ready");

        Ok(Self {
            chain,
            settings,
            patterns: config.patterns.clone(),
            active,
            pattern,
            commands,
            renderer,
            disconnected: false,
        })
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn active_pattern(&self) -> PatternKind {
        self.active
    }

    /// Ticks produced by the current pattern instance.
    pub fn cursor(&self) -> usize {
        self.pattern.cursor()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Advances the active pattern by one frame and renders it. Returns how
    /// long the frame should be held.
    pub fn tick(&mut self) -> Duration {
        if self.pattern.is_done() {
            tracing::debug!(pattern = %self.active, "sequence finished, restarting");
            self.restart();
        }

        let delay = self.pattern.advance(&mut self.chain, &self.settings);
        tracing::trace!(
            pattern = %self.active,
            cursor = self.pattern.cursor(),
            ?delay,
            "frame"
        );
        self.renderer.render(self.chain.frame());
        delay
    }

    /// Applies a single command. Unknown pattern names leave the running
    /// pattern untouched.
    pub fn apply(&mut self, command: Command) -> Result<Applied> {
        match command {
            Command::SwitchPattern(name) => {
                let kind = PatternKind::from_name(&name)?;
                tracing::info!(from = %self.active, to = %kind, "switching pattern");
                self.active = kind;
                self.restart();
                Ok(Applied::Restarted)
            }
            Command::SetBrightness(level) => {
                tracing::debug!(level, "brightness");
                self.settings.brightness = level;
                self.renderer.set_brightness(level);
                Ok(Applied::Adjusted)
            }
            Command::SetColor(colour) => {
                tracing::debug!(%colour, "base colour");
                self.settings.base_color = colour;
                Ok(Applied::Adjusted)
            }
        }
    }

    /// Holds the current frame for up to `delay`, applying commands as they
    /// arrive. Returns early when a pattern switch lands so the new pattern's
    /// first frame is rendered straight away.
    pub fn wait(&mut self, delay: Duration) -> Option<Applied> {
        let deadline = Instant::now() + delay;
        let mut last = None;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if self.disconnected {
                thread::sleep(remaining);
                return last;
            }

            match self.commands.recv_timeout(remaining) {
                Ok(command) => match self.apply(command) {
                    Ok(Applied::Restarted) => return Some(Applied::Restarted),
                    Ok(applied) => last = Some(applied),
                    Err(error) => tracing::warn!(%error, "ignoring command"),
                },
                Err(RecvTimeoutError::Timeout) => return last,
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("command channel closed, animating without commands");
                    self.disconnected = true;
                }
            }
        }
    }

    /// One tick followed by its wait window.
    pub fn step(&mut self) {
        let delay = self.tick();
        self.wait(delay);
    }

    /// Runs until the process is killed.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn restart(&mut self) {
        self.pattern = self.active.instantiate(&self.patterns, &self.chain);
    }
}

impl<R> std::fmt::Debug for Dispatcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("active", &self.active)
            .field("cursor", &self.pattern.cursor())
            .field("settings", &self.settings)
            .field("pixels", &self.chain.len())
            .field("disconnected", &self.disconnected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{command_channel, render::RecordingRenderer, CommandSender, OrnamentError, Rgb};

    fn config(default_pattern: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.engine.default_pattern = default_pattern.to_string();
        config.patterns = config.patterns.without_delays();
        config
    }

    fn dispatcher(
        default_pattern: &str,
        chain: Chain,
    ) -> (Dispatcher<RecordingRenderer>, CommandSender) {
        let (tx, rx) = command_channel();
        let dispatcher = Dispatcher::new(
            chain,
            &config(default_pattern),
            rx,
            RecordingRenderer::default(),
        )
        .unwrap();
        (dispatcher, tx)
    }

    fn lit_positions(frame: &[Rgb]) -> Vec<usize> {
        frame
            .iter()
            .enumerate()
            .filter(|(_, colour)| **colour != Rgb::BLACK)
            .map(|(position, _)| position)
            .collect()
    }

    #[test]
    fn rejects_unknown_default_pattern() {
        let (_tx, rx) = command_channel();
        let err = Dispatcher::new(
            Chain::xmas().unwrap(),
            &config("disco"),
            rx,
            RecordingRenderer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, OrnamentError::UnknownPattern(_)));
    }

    #[test]
    fn switch_takes_effect_on_next_frame() {
        let (mut dispatcher, tx) = dispatcher("rainbow_cols", Chain::xmas().unwrap());
        dispatcher.tick();
        dispatcher.tick();

        tx.send(Command::SwitchPattern("walk".to_string())).unwrap();
        assert_eq!(dispatcher.wait(Duration::ZERO), Some(Applied::Restarted));
        assert_eq!(dispatcher.active_pattern(), PatternKind::Walk);
        assert_eq!(dispatcher.cursor(), 0);

        dispatcher.tick();
        let frame = dispatcher.renderer().frames.last().unwrap();
        assert_eq!(lit_positions(frame), vec![0]);
        assert_eq!(frame[0], Rgb::RED);
    }

    #[test]
    fn unknown_pattern_leaves_state_alone() {
        let (mut dispatcher, tx) = dispatcher("rainbow_cols", Chain::xmas().unwrap());
        for _ in 0..3 {
            dispatcher.tick();
        }

        let err = dispatcher
            .apply(Command::SwitchPattern("disco".to_string()))
            .unwrap_err();
        assert!(matches!(err, OrnamentError::UnknownPattern(_)));

        tx.send(Command::SwitchPattern("disco".to_string())).unwrap();
        assert_eq!(dispatcher.wait(Duration::ZERO), None);

        assert_eq!(dispatcher.active_pattern(), PatternKind::RainbowCols);
        assert_eq!(dispatcher.cursor(), 3);
    }

    #[test]
    fn settings_changes_do_not_restart_the_pattern() {
        let (mut dispatcher, tx) = dispatcher("static", Chain::xmas().unwrap());
        dispatcher.tick();

        tx.send(Command::SetColor(Rgb::new(0, 0, 255))).unwrap();
        tx.send(Command::SetBrightness(10)).unwrap();
        assert_eq!(dispatcher.wait(Duration::ZERO), Some(Applied::Adjusted));
        assert_eq!(dispatcher.cursor(), 1);

        dispatcher.tick();
        assert_eq!(dispatcher.cursor(), 2);
        assert_eq!(dispatcher.settings().brightness, 10);

        let renderer = dispatcher.renderer();
        let frame = renderer.frames.last().unwrap();
        assert!(frame.iter().all(|&colour| colour == Rgb::new(0, 0, 255)));
        assert_eq!(renderer.brightness, vec![255, 10]);
    }

    #[test]
    fn commands_apply_in_publish_order() {
        let (mut dispatcher, tx) = dispatcher("static", Chain::xmas().unwrap());
        for level in [5, 6, 7] {
            tx.send(Command::SetBrightness(level)).unwrap();
        }
        dispatcher.wait(Duration::ZERO);
        assert_eq!(dispatcher.renderer().brightness, vec![255, 5, 6, 7]);
    }

    #[test]
    fn finished_patterns_restart_from_scratch() {
        let chain = Chain::build(&[(0, 0), (1, 0), (2, 0)]).unwrap();
        let (mut dispatcher, _tx) = dispatcher("walk", chain);

        for _ in 0..3 {
            dispatcher.tick();
        }
        assert_eq!(dispatcher.cursor(), 3);

        dispatcher.tick();
        assert_eq!(dispatcher.cursor(), 1);
        let frame = dispatcher.renderer().frames.last().unwrap();
        assert_eq!(lit_positions(frame), vec![0]);
        assert_eq!(dispatcher.renderer().frames.len(), 4);
    }

    #[test]
    fn switch_interrupts_a_long_wait() {
        let (mut dispatcher, tx) = dispatcher("static", Chain::xmas().unwrap());
        let producer = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            tx.send(Command::SwitchPattern("larsen".to_string())).unwrap();
        });

        let started = Instant::now();
        let applied = dispatcher.wait(Duration::from_secs(30));
        producer.join().unwrap();

        assert_eq!(applied, Some(Applied::Restarted));
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(dispatcher.active_pattern(), PatternKind::Larsen);
    }

    #[test]
    fn quiet_wait_holds_the_frame() {
        let (mut dispatcher, _tx) = dispatcher("static", Chain::xmas().unwrap());
        let started = Instant::now();
        assert_eq!(dispatcher.wait(Duration::from_millis(30)), None);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn keeps_animating_after_producers_hang_up() {
        let (mut dispatcher, tx) = dispatcher("larsen", Chain::xmas().unwrap());
        drop(tx);

        for _ in 0..3 {
            dispatcher.step();
        }
        assert_eq!(dispatcher.cursor(), 3);
        assert_eq!(dispatcher.renderer().frames.len(), 3);
    }
}
