use color_eyre::Result;
use crossterm::event::KeyEvent;
use customers::{filter, Customer, CustomerClient};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    action::{Action, NoticeLevel},
    backend::Backend,
    cli::Cli,
    components::{
        form::CustomerForm,
        header::Header,
        notice::NoticeBar,
        popups::{confirm::DeleteConfirmPopup, editor::EditorPopup, render_backdrop},
        search::SearchBar,
        table::CustomerTable,
        Component,
    },
    config::{Config, Mode},
    tui::{Event, EventResponse, Frame, Tui},
};

/// Die drei Abschnitte der Oberfläche, durchlaufen mit Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Form,
    Search,
    Table,
}

impl Section {
    fn next(self) -> Self {
        match self {
            Section::Form => Section::Search,
            Section::Search => Section::Table,
            Section::Table => Section::Form,
        }
    }

    fn prev(self) -> Self {
        match self {
            Section::Form => Section::Table,
            Section::Search => Section::Form,
            Section::Table => Section::Search,
        }
    }
}

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    mode: Mode,
    focus: Section,
    customers: Vec<Customer>,
    search: String,
    header: Header,
    notice: NoticeBar,
    form: CustomerForm,
    search_bar: SearchBar,
    table: CustomerTable,
    editor: Option<EditorPopup>,
    confirm: Option<DeleteConfirmPopup>,
    backend: Backend,
    should_quit: bool,
    should_suspend: bool,
    last_tick_key_events: Vec<KeyEvent>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(args: Cli) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let config = Config::new()?;

        let endpoint = args
            .endpoint
            .unwrap_or_else(|| config.config.endpoint.clone());
        let client = CustomerClient::new(endpoint)?;
        let backend = Backend::new(client, action_tx.clone());

        let mut table = CustomerTable::new();
        table.set_focused(true);

        Ok(Self {
            config,
            tick_rate: args.tick_rate,
            frame_rate: args.frame_rate,
            mode: Mode::Home,
            focus: Section::Table,
            customers: Vec::new(),
            search: String::new(),
            header: Header::default(),
            notice: NoticeBar::default(),
            form: CustomerForm::new(),
            search_bar: SearchBar::default(),
            table,
            editor: None,
            confirm: None,
            backend,
            should_quit: false,
            should_suspend: false,
            last_tick_key_events: Vec::new(),
            action_tx,
            action_rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .mouse(true)
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        // erster Abruf direkt beim Start
        self.backend.load();
        let _ = self.action_tx.send(Action::ClearScreen);
        let _ = self.action_tx.send(Action::Render);

        let action_tx = self.action_tx.clone();
        loop {
            self.handle_events(&mut tui).await?;
            self.handle_actions(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                action_tx.send(Action::ClearScreen)?;
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        let action_tx = self.action_tx.clone();
        let dispatch = |response: Option<EventResponse<Action>>| -> bool {
            match response {
                Some(EventResponse::Continue(action)) => {
                    action_tx.send(action).ok();
                    false
                }
                Some(EventResponse::Stop(action)) => {
                    action_tx.send(action).ok();
                    true
                }
                None => false,
            }
        };

        // Ein offener Dialog bekommt alles zuerst und lässt nur die
        // globalen Akkorde vorbei.
        let mut stop_event_propagation = false;
        let popup_open = self.confirm.is_some() || self.editor.is_some();
        if let Some(popup) = self.confirm.as_mut() {
            stop_event_propagation = dispatch(popup.handle_events(event.clone())?);
        } else if let Some(popup) = self.editor.as_mut() {
            stop_event_propagation = dispatch(popup.handle_events(event.clone())?);
        }

        if !stop_event_propagation && !popup_open {
            let sections: [&mut dyn Component; 3] =
                [&mut self.form, &mut self.search_bar, &mut self.table];
            for component in sections {
                if dispatch(component.handle_events(event.clone())?) {
                    stop_event_propagation = true;
                    break;
                }
            }
        }

        if !stop_event_propagation {
            match event {
                Event::Quit => self.action_tx.send(Action::Quit)?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
                Event::Resize(x, y) => self.action_tx.send(Action::Resize(x, y))?,
                Event::Key(key) => self.handle_key_event(key)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        let action_tx = self.action_tx.clone();
        let Some(keymap) = self.config.keybindings.get(&self.mode) else {
            return Ok(());
        };
        match keymap.get(&vec![key]) {
            Some(action) => {
                info!("Got action: {action:?}");
                action_tx.send(action.clone())?;
            }
            _ => {
                // If the key was not handled as a single key action,
                // then consider it for multi-key combinations.
                self.last_tick_key_events.push(key);

                // Check for multi-key combinations
                if let Some(action) = keymap.get(&self.last_tick_key_events) {
                    info!("Got action: {action:?}");
                    action_tx.send(action.clone())?;
                }
            }
        }
        Ok(())
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                debug!("{action:?}");
            }
            match action {
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(_, _) => {
                    tui.terminal.clear()?;
                    self.render(tui)?;
                }
                Action::Render => self.render(tui)?,
                action => self.apply_action(&action)?,
            }
        }
        Ok(())
    }

    /// Alle Zustandsübergänge, die kein Terminal brauchen.
    fn apply_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Tick => {
                self.last_tick_key_events.drain(..);
            }
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resume => self.should_suspend = false,
            Action::Error(msg) => error!("{msg}"),

            Action::FocusNext => self.set_focus(self.focus.next()),
            Action::FocusPrev => self.set_focus(self.focus.prev()),
            Action::FocusSearch => self.set_focus(Section::Search),

            Action::Refresh => self.backend.load(),
            Action::SearchChanged(term) => {
                self.search = term.clone();
                let filtered = filter::apply(&self.customers, &self.search);
                self.action_tx.send(Action::ListFiltered(filtered))?;
            }
            Action::CustomersLoaded(list) => {
                self.customers = list.clone();
                let filtered = filter::apply(&self.customers, &self.search);
                self.action_tx.send(Action::ListFiltered(filtered))?;
            }
            Action::LoadFailed => {
                self.action_tx.send(Action::ShowNotice(
                    NoticeLevel::Error,
                    "Error loading customers. Make sure the backend server is running."
                        .to_string(),
                ))?;
            }

            Action::SubmitCreate(draft) => self.backend.create(draft.clone()),
            Action::CreateSucceeded => {
                self.action_tx.send(Action::ShowNotice(
                    NoticeLevel::Success,
                    "Customer added successfully!".to_string(),
                ))?;
                self.action_tx.send(Action::Refresh)?;
            }
            Action::CreateFailed => {
                self.action_tx.send(Action::ShowNotice(
                    NoticeLevel::Error,
                    "Error saving customer. Please try again.".to_string(),
                ))?;
            }

            Action::OpenEditor(customer) => self.editor = Some(EditorPopup::new(customer)),
            Action::SubmitUpdate(id, draft) => self.backend.update(*id, draft.clone()),
            Action::UpdateSucceeded => {
                self.editor = None;
                self.action_tx.send(Action::ShowNotice(
                    NoticeLevel::Success,
                    "Customer updated successfully!".to_string(),
                ))?;
                self.action_tx.send(Action::Refresh)?;
            }
            Action::UpdateFailed => {
                // der Editor bleibt offen, die Eingaben gehen nicht verloren
                self.action_tx.send(Action::ShowNotice(
                    NoticeLevel::Error,
                    "Error updating customer. Please try again.".to_string(),
                ))?;
            }

            Action::ConfirmDelete(customer) => {
                self.confirm = Some(DeleteConfirmPopup::new(customer.clone()));
            }
            Action::DeleteRequested(id) => self.backend.delete(*id),
            Action::DeleteSucceeded => {
                self.confirm = None;
                self.action_tx.send(Action::ShowNotice(
                    NoticeLevel::Success,
                    "Customer deleted successfully!".to_string(),
                ))?;
                self.action_tx.send(Action::Refresh)?;
            }
            Action::DeleteFailed => {
                self.action_tx.send(Action::ShowNotice(
                    NoticeLevel::Error,
                    "Error deleting customer. Please try again.".to_string(),
                ))?;
            }

            Action::ClosePopup => {
                if self.confirm.is_some() {
                    self.confirm = None;
                } else {
                    self.editor = None;
                }
            }
            _ => {}
        }

        if let Some(popup) = self.confirm.as_mut() {
            if let Some(follow_up) = popup.update(action.clone())? {
                self.action_tx.send(follow_up)?;
            }
        }
        if let Some(popup) = self.editor.as_mut() {
            if let Some(follow_up) = popup.update(action.clone())? {
                self.action_tx.send(follow_up)?;
            }
        }
        let components: [&mut dyn Component; 4] = [
            &mut self.notice,
            &mut self.form,
            &mut self.search_bar,
            &mut self.table,
        ];
        for component in components {
            if let Some(follow_up) = component.update(action.clone())? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn set_focus(&mut self, focus: Section) {
        self.focus = focus;
        self.form.set_focused(focus == Section::Form);
        self.search_bar.set_focused(focus == Section::Search);
        self.table.set_focused(focus == Section::Table);
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let action_tx = self.action_tx.clone();
        tui.draw(|frame| {
            if let Err(err) = draw_app(self, frame) {
                let _ = action_tx.send(Action::Error(format!("Failed to draw: {:?}", err)));
            }
        })?;
        Ok(())
    }

    fn draw_footer(&self, frame: &mut Frame<'_>, area: Rect) {
        let hints: &[(&str, &str)] = if self.confirm.is_some() || self.editor.is_some() {
            &[("Enter", "Confirm"), ("Esc", "Cancel")]
        } else {
            match self.focus {
                Section::Form => &[
                    ("Tab", "Switch"),
                    ("↑/↓", "Field"),
                    ("Enter", "Add"),
                    ("Ctrl-c", "Quit"),
                ],
                Section::Search => &[("Tab", "Switch"), ("↑/↓", "Select"), ("Ctrl-c", "Quit")],
                Section::Table => &[
                    ("Tab", "Switch"),
                    ("↑/↓", "Select"),
                    ("/", "Search"),
                    ("r", "Refresh"),
                    ("e", "Edit"),
                    ("d", "Delete"),
                    ("q", "Quit"),
                ],
            }
        };

        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::raw(format!(": {label}")));
        }
        let line = Line::from(spans).fg(Color::DarkGray);
        frame.render_widget(Paragraph::new(line).centered(), area);
    }
}

fn draw_app(app: &mut App, frame: &mut Frame<'_>) -> Result<()> {
    let [header_area, notice_area, body_area, footer_area] = Layout::vertical([
        app.header.height_constraint(),
        app.notice.height_constraint(),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    app.header.draw(frame, header_area)?;
    app.notice.draw(frame, notice_area)?;

    let [form_area, right_area] =
        Layout::horizontal([Constraint::Length(46), Constraint::Min(0)]).areas(body_area);
    let [search_area, table_area] =
        Layout::vertical([app.search_bar.height_constraint(), Constraint::Fill(1)])
            .areas(right_area);

    app.form.draw(frame, form_area)?;
    app.search_bar.draw(frame, search_area)?;
    app.table.draw(frame, table_area)?;
    app.draw_footer(frame, footer_area);

    if let Some(popup) = app.editor.as_mut() {
        render_backdrop(frame, body_area);
        popup.draw(frame, body_area)?;
    }
    if let Some(popup) = app.confirm.as_mut() {
        render_backdrop(frame, body_area);
        popup.draw(frame, body_area)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_app() -> App {
        App::new(Cli {
            tick_rate: 4.0,
            frame_rate: 60.0,
            endpoint: Some("http://localhost:8080/customers".to_string()),
        })
        .unwrap()
    }

    fn sample_customer() -> Customer {
        Customer {
            id: 7,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann.lee@example.com".to_string(),
            phone: "555-0101".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            membership_type: "Gold".to_string(),
        }
    }

    fn queued(app: &mut App) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = app.action_rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    #[test]
    fn focus_cycles_through_all_three_sections() {
        assert_eq!(Section::Form.next(), Section::Search);
        assert_eq!(Section::Search.next(), Section::Table);
        assert_eq!(Section::Table.next(), Section::Form);

        assert_eq!(Section::Form.prev(), Section::Table);
        assert_eq!(Section::Table.prev(), Section::Search);
        assert_eq!(Section::Search.prev(), Section::Form);
    }

    #[test]
    fn successful_create_raises_a_notice_and_one_refetch() {
        let mut app = test_app();
        app.apply_action(&Action::CreateSucceeded).unwrap();

        assert_eq!(
            queued(&mut app),
            vec![
                Action::ShowNotice(
                    NoticeLevel::Success,
                    "Customer added successfully!".to_string()
                ),
                Action::Refresh,
            ]
        );
    }

    #[test]
    fn failed_delete_keeps_the_confirmation_open() {
        let mut app = test_app();
        app.apply_action(&Action::ConfirmDelete(sample_customer()))
            .unwrap();
        assert!(app.confirm.is_some());

        app.apply_action(&Action::DeleteFailed).unwrap();
        assert!(app.confirm.is_some());
        // kein Neuladen, nur die Fehlermeldung
        assert_eq!(
            queued(&mut app),
            vec![Action::ShowNotice(
                NoticeLevel::Error,
                "Error deleting customer. Please try again.".to_string()
            )]
        );
    }
}
