//! Shared test utilities.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use midiwire::io::{Error, Result};
use midiwire::{ByteSink, ByteSource};

/// One step of a scripted transport.
#[derive(Clone, Copy, Debug)]
pub enum Step {
    Byte(u8),
    Timeout,
}

/// Transport that replays a fixed script and records writes.
///
/// Ends the stream once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedPort {
    script: VecDeque<Step>,
    pub written: Vec<u8>,
    pub timeouts_seen: Vec<Option<Duration>>,
}

impl ScriptedPort {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: steps.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().copied().map(Step::Byte))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ByteSource for ScriptedPort {
    fn read_byte(&mut self, timeout: Option<Duration>) -> Result<u8> {
        self.timeouts_seen.push(timeout);
        match self.script.pop_front() {
            Some(Step::Byte(b)) => Ok(b),
            Some(Step::Timeout) => Err(Error::StreamTimeout),
            None => Err(Error::StreamEnded),
        }
    }
}

impl ByteSink for ScriptedPort {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.written.push(byte);
        Ok(())
    }
}

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
