use std::{
    collections::VecDeque,
    sync::{mpsc::Receiver, Arc, Mutex},
    thread,
};

use eframe::CreationContext;
use egui::plot::{Legend, Line, Plot, PlotPoints};

/// State sent to the GUI renderer on each logged iteration of training
/// (iteration, error, recent average error)
pub type IterationState = (usize, f64, f64);

/// Any type that can be rendered and updated during training
pub trait Visualizer: eframe::App + 'static {
    const DATA_LIMIT: usize = 20_000;
    fn new(cc: &CreationContext, rx: Receiver<IterationState>) -> Self;
}

/// Default gui that plots the error and its recent average while training
pub struct NNGui {
    data: Arc<Mutex<VecDeque<IterationState>>>,
}

impl Visualizer for NNGui {
    /// Initialize NNGui, but also start a thread that listens to a receiver and updates the state
    fn new(cc: &CreationContext, rx: Receiver<IterationState>) -> Self {
        let data = Arc::new(Mutex::new(VecDeque::new()));
        let data_clone = data.clone();

        let ctx = cc.egui_ctx.clone();
        thread::spawn(move || {
            // ends once the trainer drops its sender
            while let Ok(x) = rx.recv() {
                let Ok(mut data) = data_clone.lock() else {
                    break;
                };
                push_bounded(&mut data, x, Self::DATA_LIMIT);
                ctx.request_repaint();
            }
        });

        Self { data }
    }
}

impl eframe::App for NNGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let data = self.get_data();
        let (i, err, avg) = data.last().copied().unwrap_or((0, f64::INFINITY, f64::INFINITY));

        let error: PlotPoints = data.iter().map(|&(i, e, _)| [i as f64, e]).collect();
        let average: PlotPoints = data.iter().map(|&(i, _, a)| [i as f64, a]).collect();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.heading(format!("Iteration {i} error: {err:.6}"));
                ui.label(format!("Recent average error: {avg:.6}"));
                Plot::new("Error")
                    .legend(Legend::default())
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(error).name("error"));
                        plot_ui.line(Line::new(average).name("recent average"));
                    });
            });
        });
    }
}

impl NNGui {
    /// Returns a copy of the data as a vec
    /// Blocks until it can get a lock on its state data
    pub fn get_data(&self) -> Vec<IterationState> {
        self.data
            .lock()
            .map(|data| data.iter().copied().collect())
            .unwrap_or_default()
    }
}

/// Appends `x`, dropping the oldest entry once `limit` is reached.
fn push_bounded(data: &mut VecDeque<IterationState>, x: IterationState, limit: usize) {
    if data.len() >= limit {
        data.pop_front();
    }
    data.push_back(x);
}
