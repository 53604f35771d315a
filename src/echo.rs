//! Echo observer
//!
//! Pretty-prints a document from the calls it receives, using nothing but the
//! schema: every element is written as a start tag with its coerced attribute
//! values, children are indented by three spaces, and the end tag follows
//! after the last child. Absent attributes are left out, defaulted ones are
//! written with their default value.
//!
//! ```text
//! <Cameras>
//!    <Camera position="0 0 10" direction="0 0 -1" up="0 1 0" fovy="45" name="main">
//!    </Camera>
//! </Cameras>
//! ```

use std::io::{self, Write};

use quick_xml::escape::escape;

use crate::dispatch::{Arguments, Observer, ObserverResult};
use crate::schema::ElementSchema;

const INDENT: &str = "   ";

/// Observer writing every element it sees back out as markup
#[derive(Debug)]
pub struct EchoObserver<W: Write> {
    out: W,
    depth: usize,
}

impl<W: Write> EchoObserver<W> {
    /// Create an echo observer writing to `out`
    pub fn new(out: W) -> Self {
        Self { out, depth: 0 }
    }

    /// Get the output sink
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the observer, returning the output sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn indent(&mut self) -> io::Result<()> {
        for _ in 0..self.depth {
            self.out.write_all(INDENT.as_bytes())?;
        }
        Ok(())
    }
}

impl EchoObserver<io::Stdout> {
    /// Create an echo observer writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Observer for EchoObserver<W> {
    fn begin(&mut self, element: &ElementSchema, args: &Arguments<'_>) -> ObserverResult {
        self.indent()?;
        write!(self.out, "<{}", element.name())?;
        for (spec, value) in args.iter() {
            if let Some(value) = value {
                write!(self.out, " {}=\"{}\"", spec.name(), escape(value.to_string().as_str()))?;
            }
        }
        writeln!(self.out, ">")?;
        self.depth += 1;
        Ok(())
    }

    fn end(&mut self, element: &ElementSchema) -> ObserverResult {
        self.depth = self.depth.saturating_sub(1);
        self.indent()?;
        writeln!(self.out, "</{}>", element.name())?;
        self.out.flush()?;
        Ok(())
    }
}
