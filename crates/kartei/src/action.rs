use customers::{Customer, CustomerDraft};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Einstufung einer Statusmeldung über der Tabelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),
    Update,
    // Fokus zwischen Formular, Suche und Tabelle
    FocusNext,
    FocusPrev,
    FocusSearch,
    // Tabelle
    SelectNext,
    SelectPrev,
    EditSelected,
    DeleteSelected,
    // Suche
    SearchChanged(String),
    ListFiltered(Vec<Customer>),
    // Laden
    Refresh,
    CustomersLoaded(Vec<Customer>),
    LoadFailed,
    // Anlegen
    SubmitCreate(CustomerDraft),
    CreateSucceeded,
    CreateFailed,
    // Bearbeiten
    OpenEditor(Customer),
    SubmitUpdate(i64, CustomerDraft),
    UpdateSucceeded,
    UpdateFailed,
    // Löschen
    ConfirmDelete(Customer),
    DeleteRequested(i64),
    DeleteSucceeded,
    DeleteFailed,
    ClosePopup,
    // Statuszeile
    ShowNotice(NoticeLevel, String),
}
