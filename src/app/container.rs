use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, LocalFsAdapter, MediaToolPaths};
use crate::app::{
    batch_interactor::BatchInteractor, inspect_interactor::InspectInteractor,
    trim_interactor::TrimInteractor,
};
use crate::domain::model::EncodeSettings;
use crate::ports::{ExecutePort, FsPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn batch_interactor(&self) -> Arc<BatchInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
}

pub struct DefaultAppContainer {
    batch_interactor: Arc<BatchInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    /// Wire the ffmpeg-backed adapters for the resolved tool paths
    pub fn new(tools: &MediaToolPaths, settings: EncodeSettings, workers: usize) -> Self {
        let probe_port: Arc<dyn ProbePort> = Arc::new(FFprobeAdapter::new(tools));
        let execute_port: Arc<dyn ExecutePort> = Arc::new(FFmpegAdapter::new(tools));
        let fs_port: Arc<dyn FsPort> = Arc::new(LocalFsAdapter::new());

        Self::with_ports(probe_port, execute_port, fs_port, settings, workers)
    }

    /// Wire interactors around arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        settings: EncodeSettings,
        workers: usize,
    ) -> Self {
        let trim_interactor = Arc::new(TrimInteractor::new(
            Arc::clone(&probe_port),
            execute_port,
            settings,
        ));

        let batch_interactor = Arc::new(BatchInteractor::new(
            trim_interactor,
            Arc::clone(&fs_port),
            workers,
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(probe_port, fs_port));

        Self {
            batch_interactor,
            inspect_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn batch_interactor(&self) -> Arc<BatchInteractor> {
        Arc::clone(&self.batch_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }
}
