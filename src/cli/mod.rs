//! # CLI Module
//!
//! Per-command orchestration for tagwalk. Each command glues the tree walker,
//! the tag store and (for `set-tags`) the metadata resolver together, and
//! decides which failures end the run.
//!
//! ## Commands
//!
//! - [`list_tags`] - Prints the current tags of every MP3 below a root
//! - [`set_tags`] - Writes title, album, artist and year into every MP3 below a root
//!
//! ## Failure policy
//!
//! | Failure                     | `list-tags` | `set-tags`            |
//! |-----------------------------|-------------|-----------------------|
//! | root path missing           | fatal       | fatal                 |
//! | directory cannot be listed  | fatal       | fatal                 |
//! | tags cannot be opened       | fatal       | fatal                 |
//! | tags cannot be saved        | -           | logged, walk goes on  |
//!
//! A fatal failure comes back as `Err` with nothing rolled back: files
//! already printed or saved stay that way.
//!
//! ## Usage
//!
//! ```bash
//! tagwalk list-tags --path ~/Music
//! tagwalk set-tags --path ~/Music --artistIndex -3 --yearIndex -2 --albumIndex -1
//! tagwalk set-tags --path "~/Music/Various" --artist "Various Artists" --albumIndex -1
//! ```

mod list;
mod set;

pub use list::list_tags;
pub use set::{SetSummary, set_tags};
