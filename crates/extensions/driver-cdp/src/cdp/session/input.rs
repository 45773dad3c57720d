//! Input (mouse and keyboard) operations for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEventType, MouseButton, MouseEventType};
use crate::keys::{select_all_modifier, KeyDef, Keystroke};

use super::core::PageSession;

impl PageSession {
    /// Click at viewport coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseMoved,
                "x": x,
                "y": y,
                "button": MouseButton::None,
            })),
        )
        .await?;

        for event in [MouseEventType::MousePressed, MouseEventType::MouseReleased] {
            self.call(
                "Input.dispatchMouseEvent",
                Some(json!({
                    "type": event,
                    "x": x,
                    "y": y,
                    "button": MouseButton::Left,
                    "clickCount": 1,
                })),
            )
            .await?;
        }

        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Press and release a named key on the focused element.
    pub async fn press(&self, key: &KeyDef) -> Result<(), CdpError> {
        let mut down = json!({
            "type": KeyEventType::KeyDown,
            "key": key.key,
            "code": key.code,
            "windowsVirtualKeyCode": key.key_code,
        });
        if let Some(text) = key.text {
            down["text"] = json!(text);
        }
        self.call("Input.dispatchKeyEvent", Some(down)).await?;

        self.call(
            "Input.dispatchKeyEvent",
            Some(json!({
                "type": KeyEventType::KeyUp,
                "key": key.key,
                "code": key.code,
                "windowsVirtualKeyCode": key.key_code,
            })),
        )
        .await?;
        Ok(())
    }

    /// Type one character as a key down/up pair.
    pub async fn type_char(&self, c: char) -> Result<(), CdpError> {
        let text = c.to_string();
        self.call(
            "Input.dispatchKeyEvent",
            Some(json!({
                "type": KeyEventType::KeyDown,
                "key": text,
                "text": text,
            })),
        )
        .await?;
        self.call(
            "Input.dispatchKeyEvent",
            Some(json!({
                "type": KeyEventType::KeyUp,
                "key": text,
            })),
        )
        .await?;
        Ok(())
    }

    /// Select everything in the focused field.
    pub async fn select_all(&self) -> Result<(), CdpError> {
        let modifiers = select_all_modifier();
        self.call(
            "Input.dispatchKeyEvent",
            Some(json!({
                "type": KeyEventType::RawKeyDown,
                "key": "a",
                "code": "KeyA",
                "windowsVirtualKeyCode": 65,
                "modifiers": modifiers,
                "commands": ["selectAll"],
            })),
        )
        .await?;
        self.call(
            "Input.dispatchKeyEvent",
            Some(json!({
                "type": KeyEventType::KeyUp,
                "key": "a",
                "code": "KeyA",
                "windowsVirtualKeyCode": 65,
                "modifiers": modifiers,
            })),
        )
        .await?;
        Ok(())
    }

    /// Send one planned keystroke.
    pub async fn keystroke(&self, stroke: &Keystroke) -> Result<(), CdpError> {
        match stroke {
            Keystroke::SelectAll => self.select_all().await,
            Keystroke::Key(key) => self.press(key).await,
            Keystroke::Char(c) => self.type_char(*c).await,
        }
    }
}
