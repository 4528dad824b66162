use crate::backend::{NoteStore, StoreError};
use crate::messages::{ResponseMessage, Snapshot, StoreRequest};
use crate::models::NoteFilter;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::{debug, error, info};

/// Owns the store on a background thread so the UI never waits on disk or network
pub struct Worker {
    store: Box<dyn NoteStore>,
    receiver: Receiver<StoreRequest>,
    response_sender: Sender<ResponseMessage>,
    repaint: Option<egui::Context>,
}

impl Worker {
    pub fn new(
        store: Box<dyn NoteStore>,
        receiver: Receiver<StoreRequest>,
        response_sender: Sender<ResponseMessage>,
        repaint: Option<egui::Context>,
    ) -> Self {
        Self {
            store,
            receiver,
            response_sender,
            repaint,
        }
    }

    pub fn run(mut self) {
        while let Ok(request) = self.receiver.recv() {
            debug!("Handling {:?}", request);
            let response = self.handle(request);
            if self.response_sender.send(response).is_err() {
                // UI is gone
                break;
            }
            if let Some(ctx) = &self.repaint {
                ctx.request_repaint();
            }
        }
        info!("Store worker stopped");
    }

    fn handle(&mut self, request: StoreRequest) -> ResponseMessage {
        let store = self.store.as_mut();
        match request {
            StoreRequest::Refresh(filter) => ResponseMessage::Refreshed(text(snapshot(store, &filter))),
            StoreRequest::CreateNote(draft) => ResponseMessage::NoteCreated(text(store.create_note(&draft))),
            StoreRequest::UpdateNote { id, update } => {
                ResponseMessage::NoteUpdated(text(store.update_note(&id, &update)))
            }
            StoreRequest::DeleteNote(id) => {
                ResponseMessage::NoteDeleted(text(store.delete_note(&id).map(|_| id)))
            }
            StoreRequest::LoadHistory(id) => {
                let history = text(store.history(&id));
                ResponseMessage::HistoryLoaded(id, history)
            }
            StoreRequest::CreateFolder(name) => {
                ResponseMessage::FolderSaved(text(store.create_folder(&name)))
            }
            StoreRequest::RenameFolder { id, name } => {
                ResponseMessage::FolderSaved(text(store.rename_folder(&id, &name)))
            }
            StoreRequest::DeleteFolder(id) => {
                ResponseMessage::FolderDeleted(text(store.delete_folder(&id).map(|_| id)))
            }
            StoreRequest::CreateTag { name, color } => {
                ResponseMessage::TagCreated(text(store.create_tag(&name, &color)))
            }
        }
    }
}

fn snapshot(store: &dyn NoteStore, filter: &NoteFilter) -> Result<Snapshot, StoreError> {
    let notes = store.notes(filter)?;
    let total_notes = if filter.is_empty() {
        notes.len()
    } else {
        store.notes(&NoteFilter::default())?.len()
    };
    Ok(Snapshot {
        notes,
        folders: store.folders()?,
        tags: store.tags()?,
        total_notes,
    })
}

/// Errors cross the thread boundary as display text
fn text<T>(result: Result<T, StoreError>) -> Result<T, String> {
    result.map_err(|e| {
        error!("Store operation failed: {}", e);
        e.to_string()
    })
}

pub fn spawn_worker(
    store: Box<dyn NoteStore>,
    repaint: Option<egui::Context>,
) -> (Sender<StoreRequest>, Receiver<ResponseMessage>) {
    let (sender, receiver) = mpsc::channel();
    let (response_sender, response_receiver) = mpsc::channel();
    thread::spawn(move || {
        let worker = Worker::new(store, receiver, response_sender, repaint);
        worker.run();
    });
    (sender, response_receiver)
}
