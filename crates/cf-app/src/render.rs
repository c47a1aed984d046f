//! Renderer seam and plain-data renderers.
//!
//! Plotting and animation live outside this workspace. Anything that wants
//! to present a trajectory implements [`Renderer`]; the CSV and JSON
//! renderers here write frame tables for such tools to pick up.

use std::io::Write;

use cf_sim::{FrameState, Trajectory};
use serde::Serialize;

use crate::error::AppResult;

/// Consumes a finished trajectory.
pub trait Renderer {
    fn render(&mut self, trajectory: &Trajectory) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointRecord {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub ax: f64,
    pub ay: f64,
}

/// Output record for one frame: `{ t, a:{x,y}, b:{x,y,vx,vy,ax,ay}, c:{x,y} }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRecord {
    pub index: usize,
    pub t: f64,
    pub phi: f64,
    pub a: PointRecord,
    pub b: JointRecord,
    pub c: PointRecord,
}

impl From<&FrameState> for FrameRecord {
    fn from(frame: &FrameState) -> Self {
        let b = &frame.b;
        Self {
            index: frame.index,
            t: frame.t,
            phi: frame.phi,
            a: PointRecord {
                x: frame.a.x,
                y: frame.a.y,
            },
            b: JointRecord {
                x: b.position.x,
                y: b.position.y,
                vx: b.velocity.x,
                vy: b.velocity.y,
                ax: b.acceleration.x,
                ay: b.acceleration.y,
            },
            c: PointRecord {
                x: frame.c.x,
                y: frame.c.y,
            },
        }
    }
}

/// One CSV row per frame.
pub struct CsvRenderer<W: Write> {
    out: W,
}

impl<W: Write> CsvRenderer<W> {
    pub const HEADER: &'static str = "index,t,phi,a_x,a_y,b_x,b_y,b_vx,b_vy,b_ax,b_ay,c_x,c_y";

    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for CsvRenderer<W> {
    fn render(&mut self, trajectory: &Trajectory) -> AppResult<()> {
        writeln!(self.out, "{}", Self::HEADER)?;
        for frame in trajectory {
            let r = FrameRecord::from(frame);
            writeln!(
                self.out,
                "{},{},{},{},{},{},{},{},{},{},{},{},{}",
                r.index,
                r.t,
                r.phi,
                r.a.x,
                r.a.y,
                r.b.x,
                r.b.y,
                r.b.vx,
                r.b.vy,
                r.b.ax,
                r.b.ay,
                r.c.x,
                r.c.y
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// JSON array of [`FrameRecord`].
pub struct JsonRenderer<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, trajectory: &Trajectory) -> AppResult<()> {
        let records: Vec<FrameRecord> = trajectory.iter().map(FrameRecord::from).collect();
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &records)?;
        } else {
            serde_json::to_writer(&mut self.out, &records)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Write a `(t, value)` series as two-column CSV.
pub fn write_series_csv<W: Write>(
    mut out: W,
    column: &str,
    series: &[(f64, f64)],
) -> AppResult<()> {
    writeln!(out, "t,{}", column)?;
    for (t, v) in series {
        writeln!(out, "{},{}", t, v)?;
    }
    out.flush()?;
    Ok(())
}
