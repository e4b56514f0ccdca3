// Background render worker.
// The UI thread posts a RenderRequest whenever the selection or colors change
// and keeps handling drag/resize ticks while the assets decode. The worker
// answers with a RenderResult carrying the same generation number; results
// older than the newest request are dropped by the caller.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use image::RgbaImage;

use crate::compositor::{self, Palette, Selection};
use crate::error::Error;

pub struct RenderRequest {
    pub generation: u64,
    pub selection: Selection,
    pub palette: Palette,
}

pub struct RenderResult {
    pub generation: u64,
    pub surface: Result<RgbaImage, Error>,
}

pub struct RenderWorker {
    request_tx: Option<Sender<RenderRequest>>,
    result_rx: Receiver<RenderResult>,
    handle: Option<JoinHandle<()>>,
    next_generation: u64,
    latest: u64,
}

impl RenderWorker {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = unbounded::<RenderRequest>();
        let (result_tx, result_rx) = unbounded::<RenderResult>();

        let handle = thread::spawn(move || Self::worker_loop(request_rx, result_tx));

        Self {
            request_tx: Some(request_tx),
            result_rx,
            handle: Some(handle),
            next_generation: 1,
            latest: 0,
        }
    }

    fn worker_loop(request_rx: Receiver<RenderRequest>, result_tx: Sender<RenderResult>) {
        // Ends when the UI side drops its sender.
        for req in request_rx.iter() {
            let surface = compositor::render(&req.selection, &req.palette);
            if result_tx.send(RenderResult { generation: req.generation, surface }).is_err() {
                break;
            }
        }
        log::debug!("Render worker exiting");
    }

    /// Queue a full re-render. Returns the request's generation.
    pub fn request(&mut self, selection: Selection, palette: Palette) -> Result<u64, Error> {
        let generation = self.next_generation;
        self.next_generation += 1;
        let tx = self.request_tx.as_ref().ok_or(Error::WorkerGone)?;
        tx.send(RenderRequest { generation, selection, palette }).map_err(|_| Error::WorkerGone)?;
        self.latest = generation;
        Ok(generation)
    }

    /// True while the newest request has not been answered.
    pub fn is_pending(&self, shown: u64) -> bool {
        shown < self.latest
    }

    /// Non-blocking: the newest finished result, if one arrived since the last
    /// poll. Stale generations are discarded.
    pub fn poll(&mut self) -> Option<RenderResult> {
        let mut newest: Option<RenderResult> = None;
        while let Ok(res) = self.result_rx.try_recv() {
            if newest.as_ref().is_none_or(|n| res.generation > n.generation) {
                newest = Some(res);
            }
        }
        newest.filter(|r| r.generation == self.latest)
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.request_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn missing_selection() -> Selection {
        let p = PathBuf::from("no/such/asset.png");
        Selection { garment: p.clone(), shoulder: p.clone(), stripes: p.clone(), stripes2: p, neck: None }
    }

    fn wait(worker: &mut RenderWorker) -> RenderResult {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(r) = worker.poll() {
                return r;
            }
            assert!(Instant::now() < deadline, "render worker timed out");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn failed_load_reports_error() {
        let mut worker = RenderWorker::spawn();
        let generation = worker.request(missing_selection(), Palette::default()).unwrap();
        assert!(worker.is_pending(0));
        let res = wait(&mut worker);
        assert_eq!(res.generation, generation);
        assert!(matches!(res.surface, Err(Error::AssetLoad { .. })));
        assert!(!worker.is_pending(res.generation));
    }

    #[test]
    fn only_newest_generation_is_delivered() {
        let mut worker = RenderWorker::spawn();
        worker.request(missing_selection(), Palette::default()).unwrap();
        worker.request(missing_selection(), Palette::default()).unwrap();
        let last = worker.request(missing_selection(), Palette::default()).unwrap();
        let res = wait(&mut worker);
        assert_eq!(res.generation, last);
    }
}
