//! Hover interaction over the rendered cells.
//!
//! Observers register with a [`HoverDispatcher`] bound to a cell set and are
//! notified in registration order when the pointer enters or leaves a cell.
//! [`Tooltip`] is the singleton overlay: entering a cell shows it next to the
//! pointer, leaving hides it again without clearing its content.

use std::cell::RefCell;
use std::rc::Rc;

use heatmap_common::month_name;
use serde::{Deserialize, Serialize};

use crate::axis::format_fixed;
use tracing::debug;

use crate::chart::Cell;

/// Pointer position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub page_x: f64,
    pub page_y: f64,
}

impl Pointer {
    pub fn new(page_x: f64, page_y: f64) -> Self {
        Self { page_x, page_y }
    }
}

/// Receives hover notifications for cells.
pub trait HoverObserver {
    fn on_enter(&mut self, cell: &Cell, pointer: Pointer);
    fn on_leave(&mut self, cell: &Cell);
}

impl<T: HoverObserver> HoverObserver for Rc<RefCell<T>> {
    fn on_enter(&mut self, cell: &Cell, pointer: Pointer) {
        self.borrow_mut().on_enter(cell, pointer);
    }

    fn on_leave(&mut self, cell: &Cell) {
        self.borrow_mut().on_leave(cell);
    }
}

/// Tooltip placement and formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Horizontal offset from the pointer
    pub offset_x: f64,
    /// Vertical offset from the pointer
    pub offset_y: f64,
    /// Decimal places for the temperature
    pub precision: usize,
    /// Suffix appended to the temperature
    pub unit: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset_x: 10.0,
            offset_y: -28.0,
            precision: 2,
            unit: "℃".to_string(),
        }
    }
}

/// Format the tooltip body for a cell.
pub fn tooltip_html(cell: &Cell, config: &TooltipConfig) -> String {
    format!(
        "Year: {}<br>Month: {}<br>Temp: {}{}",
        cell.year,
        month_name(cell.month).unwrap_or_default(),
        format_fixed(cell.temperature, config.precision),
        config.unit
    )
}

/// The single reusable overlay element.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    config: TooltipConfig,
    opacity: f64,
    html: String,
    data_year: Option<i32>,
    left: f64,
    top: f64,
}

impl Tooltip {
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            opacity: 0.0,
            html: String::new(),
            data_year: None,
            left: 0.0,
            top: 0.0,
        }
    }

    /// Convenience for sharing one tooltip between a dispatcher and its owner.
    pub fn shared(config: TooltipConfig) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(config)))
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Content with line breaks instead of markup.
    pub fn text(&self) -> String {
        self.html.replace("<br>", "\n")
    }

    pub fn data_year(&self) -> Option<i32> {
        self.data_year
    }

    /// `(left, top)` in page coordinates.
    pub fn position(&self) -> (f64, f64) {
        (self.left, self.top)
    }

    /// Inline CSS equivalent of the current state.
    pub fn style(&self) -> String {
        format!(
            "opacity: {}; left: {}px; top: {}px;",
            self.opacity, self.left, self.top
        )
    }
}

impl HoverObserver for Tooltip {
    fn on_enter(&mut self, cell: &Cell, pointer: Pointer) {
        self.opacity = 1.0;
        self.html = tooltip_html(cell, &self.config);
        self.data_year = Some(cell.year);
        self.left = pointer.page_x + self.config.offset_x;
        self.top = pointer.page_y + self.config.offset_y;
    }

    fn on_leave(&mut self, _cell: &Cell) {
        self.opacity = 0.0;
    }
}

/// Routes pointer events over a cell set to registered observers.
pub struct HoverDispatcher<'a> {
    cells: &'a [Cell],
    observers: Vec<Box<dyn HoverObserver + 'a>>,
    hovered: Option<usize>,
}

impl<'a> HoverDispatcher<'a> {
    pub fn new(cells: &'a [Cell]) -> Self {
        Self {
            cells,
            observers: Vec::new(),
            hovered: None,
        }
    }

    pub fn register(&mut self, observer: impl HoverObserver + 'a) {
        self.observers.push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Index of the cell currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Notify observers that the pointer entered cell `index`.
    ///
    /// Returns false when `index` does not name a cell.
    pub fn pointer_enter(&mut self, index: usize, pointer: Pointer) -> bool {
        let Some(cell) = self.cells.get(index) else {
            debug!(index, "pointer_enter on unknown cell ignored");
            return false;
        };
        for observer in &mut self.observers {
            observer.on_enter(cell, pointer);
        }
        self.hovered = Some(index);
        true
    }

    /// Notify observers that the pointer left cell `index`.
    pub fn pointer_leave(&mut self, index: usize) -> bool {
        let Some(cell) = self.cells.get(index) else {
            debug!(index, "pointer_leave on unknown cell ignored");
            return false;
        };
        for observer in &mut self.observers {
            observer.on_leave(cell);
        }
        if self.hovered == Some(index) {
            self.hovered = None;
        }
        true
    }

    /// Move the pointer to a position over `hit` (or over no cell), emitting
    /// leave/enter pairs when the hovered cell changes.
    pub fn pointer_move(&mut self, hit: Option<usize>, pointer: Pointer) {
        if hit == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered {
            self.pointer_leave(previous);
        }
        if let Some(next) = hit {
            self.pointer_enter(next, pointer);
        }
    }
}
