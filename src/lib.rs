/*!
This crate composes text fragments that carry their own foreground and
background colors, and renders them to a terminal. Fragments concatenate
like strings, and each piece keeps its colors until it is rendered.

# Organization

`Fragment` is the central type: a leaf of text with optional colors, or a
composite of child fragments. It is built with constructors, the presets in
`presets::fore` and `presets::back`, and `+`.

The `WriteColor` trait extends `io::Write` with methods for setting the
foreground, setting the background and resetting both. Fragments render to
any `WriteColor`.

`StandardStream` and `StandardStreamLock` satisfy `WriteColor` and write to
stdout or stderr. `Ansi` and `NoColor` satisfy `WriteColor` for arbitrary
implementors of `io::Write`, and `Buffer` renders to memory.

`RenderConfig` holds the settings that affect rendering: whether the sink is
reset after each render and which colors count as the defaults.

# Example

```rust,no_run
# fn test() -> std::io::Result<()> {
use tinted::presets::{back, fore};
use tinted::RenderConfig;

let config = RenderConfig::default();
let mut stdout = config.stdout();
let line = fore::green() + "ok" + back::dark_red() + " 2 warnings";
line.render_line(&mut stdout, &config)?;
# Ok(()) }
```
*/

pub mod ansi;
pub mod config;
pub mod error;
mod fragment;
pub mod presets;
mod traits;
mod types;
mod writers;

pub use ansi::{AnsiColor, ansi_color, ansi_color_only};
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use fragment::Fragment;
pub use traits::WriteColor;
pub use types::{Color, ColorChoice, ColorChoiceParseError, ParseColorError};
pub use writers::{Ansi, Buffer, NoColor, StandardStream, StandardStreamLock};
