//! Portal host application
//!
//! Runs the single-threaded event loop: one [`HostEvent`] at a time is taken
//! from the input channel, dispatched to completion, reflected on the
//! surface, and the resulting declarative state is written as one JSON line.

use crate::greeting::current_greeting;
use crate::input::HostEvent;
use crate::surface::{ExternalOpener, HeadlessSurface};
use crossbeam_channel::Receiver;
use portal_core::{LauncherConfig, ServiceDescriptor, ShellDispatcher, ShellInput, ShellSnapshot};
use serde::Serialize;
use std::collections::VecDeque;
use std::io::Write;

/// Viewport the shell starts with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub pointer_is_coarse: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            pointer_is_coarse: false,
        }
    }
}

/// One line of output
#[derive(Serialize)]
struct OutputLine<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    greeting: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<&'a [ServiceDescriptor]>,
    #[serde(flatten)]
    snapshot: ShellSnapshot,
}

pub struct App<O: ExternalOpener, W: Write> {
    dispatcher: ShellDispatcher,
    surface: HeadlessSurface<O>,
    events: Receiver<HostEvent>,
    output: W,
    greeting: String,
}

impl<O: ExternalOpener, W: Write> App<O, W> {
    pub fn new(
        config: LauncherConfig,
        viewport: Viewport,
        opener: O,
        events: Receiver<HostEvent>,
        output: W,
    ) -> Self {
        let greeting = current_greeting(config.greeting_name.as_deref());
        Self {
            dispatcher: ShellDispatcher::new(
                config.services,
                viewport.width,
                viewport.pointer_is_coarse,
            ),
            surface: HeadlessSurface::new(opener),
            events,
            output,
            greeting,
        }
    }

    pub fn dispatcher(&self) -> &ShellDispatcher {
        &self.dispatcher
    }

    pub fn surface(&self) -> &HeadlessSurface<O> {
        &self.surface
    }

    /// Consume the output writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until a quit event arrives or every sender is gone, then tear
    /// down all views.
    pub fn run(&mut self) -> std::io::Result<()> {
        self.emit_initial()?;

        while let Ok(event) = self.events.recv() {
            match event {
                HostEvent::Input(input) => self.handle_input(input)?,
                HostEvent::Quit => {
                    ::log::info!("Quit requested");
                    break;
                }
            }
        }

        self.shutdown();
        self.output.flush()
    }

    /// Dispatch an input, then every load completion it triggers as a
    /// separate event. One line is emitted per dispatch that changed state.
    pub fn handle_input(&mut self, input: ShellInput) -> std::io::Result<()> {
        let mut queue = VecDeque::from([input]);

        while let Some(input) = queue.pop_front() {
            let effects = self.dispatcher.dispatch(input);
            for effect in &effects {
                self.surface.apply(effect);
            }
            if !effects.is_empty() {
                self.emit_snapshot()?;
            }
            queue.extend(self.surface.take_completions());
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        let effects = self.dispatcher.teardown();
        for effect in &effects {
            self.surface.apply(effect);
        }
        ::log::info!("Shell stopped, {} views disposed", effects.len());
    }

    fn emit_initial(&mut self) -> std::io::Result<()> {
        let line = OutputLine {
            greeting: Some(&self.greeting),
            services: Some(self.dispatcher.router().services().services()),
            snapshot: self.dispatcher.snapshot(),
        };
        write_line(&mut self.output, &line)
    }

    fn emit_snapshot(&mut self) -> std::io::Result<()> {
        let line = OutputLine {
            greeting: None,
            services: None,
            snapshot: self.dispatcher.snapshot(),
        };
        write_line(&mut self.output, &line)
    }
}

fn write_line<W: Write>(output: &mut W, line: &OutputLine<'_>) -> std::io::Result<()> {
    serde_json::to_writer(&mut *output, line)?;
    output.write_all(b"\n")?;
    output.flush()
}
