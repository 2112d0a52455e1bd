//! Best-effort speech side channels.
//!
//! Synthesis and recognition failures are logged at `warn` and swallowed;
//! they never block or alter the text chat.

use std::sync::Arc;

use tracing::warn;

use crate::error::VoiceError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtteranceSettings {
    pub rate: f32,
    pub pitch: f32,
}

impl Default for UtteranceSettings {
    fn default() -> Self {
        Self {
            rate: 0.8,
            pitch: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionSettings {
    pub continuous: bool,
    pub interim_results: bool,
    pub language: String,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            language: "en-US".to_string(),
        }
    }
}

pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str, settings: &UtteranceSettings) -> Result<(), VoiceError>;

    /// Stop any utterance in progress.
    fn cancel(&self) -> Result<(), VoiceError>;
}

pub trait SpeechRecognizer: Send + Sync {
    fn start(&self, settings: &RecognitionSettings) -> Result<(), VoiceError>;

    fn stop(&self) -> Result<(), VoiceError>;
}

/// Used where no speech device exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SpeechSynthesizer for Silent {
    fn speak(&self, _text: &str, _settings: &UtteranceSettings) -> Result<(), VoiceError> {
        Ok(())
    }

    fn cancel(&self) -> Result<(), VoiceError> {
        Ok(())
    }
}

impl SpeechRecognizer for Silent {
    fn start(&self, _settings: &RecognitionSettings) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported)
    }

    fn stop(&self) -> Result<(), VoiceError> {
        Ok(())
    }
}

/// Cancel whatever is playing, then speak `text`.
pub fn speak_best_effort(synth: &dyn SpeechSynthesizer, text: &str) {
    if let Err(e) = synth.cancel() {
        warn!(error = %e, "speech cancel failed");
    }
    if let Err(e) = synth.speak(text, &UtteranceSettings::default()) {
        warn!(error = %e, "speech synthesis error");
    }
}

/// Accumulates recognition results into one transcript.
#[derive(Debug, Default, Clone)]
pub struct TranscriptBuffer {
    text: String,
    interim_results: bool,
}

impl TranscriptBuffer {
    pub fn new(interim_results: bool) -> Self {
        Self {
            text: String::new(),
            interim_results,
        }
    }

    /// Append one recognition event. Interim text is kept only when the
    /// recognizer was asked for interim results.
    pub fn on_result(&mut self, final_text: &str, interim_text: &str) {
        self.text.push_str(final_text);
        if self.interim_results {
            self.text.push_str(interim_text);
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reset(&mut self) {
        self.text.clear();
    }

    /// Take the transcript, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

/// Microphone input feeding a [`TranscriptBuffer`].
pub struct VoiceInput {
    recognizer: Arc<dyn SpeechRecognizer>,
    settings: RecognitionSettings,
    transcript: TranscriptBuffer,
    listening: bool,
    last_error: Option<String>,
}

impl VoiceInput {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, settings: RecognitionSettings) -> Self {
        let transcript = TranscriptBuffer::new(settings.interim_results);
        Self {
            recognizer,
            settings,
            transcript,
            listening: false,
            last_error: None,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn start_listening(&mut self) {
        if self.listening {
            return;
        }
        match self.recognizer.start(&self.settings) {
            Ok(()) => {
                self.listening = true;
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "speech recognition unavailable");
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn stop_listening(&mut self) {
        if !self.listening {
            return;
        }
        if let Err(e) = self.recognizer.stop() {
            warn!(error = %e, "speech recognition stop failed");
        }
        self.listening = false;
    }

    /// Feed a recognition event. A non-continuous recognizer stops after
    /// its first result.
    pub fn on_result(&mut self, final_text: &str, interim_text: &str) {
        self.transcript.on_result(final_text, interim_text);
        if !self.settings.continuous {
            self.listening = false;
        }
    }

    /// The recognizer reported an error and ended the session.
    pub fn on_error(&mut self, error: &str) {
        warn!(error, "speech recognition error");
        self.last_error = Some(error.to_string());
        self.listening = false;
    }

    pub fn transcript(&self) -> &str {
        self.transcript.text()
    }

    /// Hand the transcript to the caller and stop listening.
    pub fn take_transcript(&mut self) -> String {
        self.stop_listening();
        self.transcript.take()
    }
}
