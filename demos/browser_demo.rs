//! Table browser demo: the full shell driving every widget.
//!
//! An in-memory table store stands in for a database. F1 shows the table
//! list, Enter opens the selected table in a query view, F2 opens an empty
//! query view, F3/F4 cycle between query views, F8 closes one, F5 runs the
//! statement, Tab switches between editor and result, F10 exits.
//!
//! The demo's statement "dialect" is deliberately tiny: `SELECT ... FROM
//! <table>` returns the table, `DELETE FROM <table>` empties it, anything
//! else is an error shown in the message pane.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io;
use std::sync::{Arc, Mutex};

use termgrid::widget::{ExecFn, QueryFn};
use termgrid::{
    DataError, DataTable, InputEvent, KeyCode, ListView, MenuItem, QueryView, Rect, ScreenBuffer,
    Shell, ShellConfig, Value, Widget, Workspace,
};

type TableStore = Arc<Mutex<BTreeMap<String, DataTable>>>;

/// The two screens of the browser, kept as concrete types so the event loop
/// can reach into them.
enum AppView {
    Tables(ListView),
    Query(QueryView),
}

impl Widget for AppView {
    fn bounds(&self) -> Rect {
        match self {
            Self::Tables(v) => v.bounds(),
            Self::Query(v) => v.bounds(),
        }
    }

    fn set_bounds(&mut self, bounds: Rect) {
        match self {
            Self::Tables(v) => v.set_bounds(bounds),
            Self::Query(v) => v.set_bounds(bounds),
        }
    }

    fn handle_key(&mut self, event: &termgrid::KeyEvent) -> bool {
        match self {
            Self::Tables(v) => v.handle_key(event),
            Self::Query(v) => v.handle_key(event),
        }
    }

    fn draw(&mut self, screen: &mut ScreenBuffer) -> Result<(), termgrid::GeometryError> {
        match self {
            Self::Tables(v) => v.draw(screen),
            Self::Query(v) => v.draw(screen),
        }
    }
}

fn demo_store() -> BTreeMap<String, DataTable> {
    let mut store = BTreeMap::new();

    let mut artists = DataTable::with_columns(["id", "name", "country"]);
    artists.push_row(vec![Value::Integer(1), Value::from("Holst"), Value::from("UK")]);
    artists.push_row(vec![Value::Integer(2), Value::from("Ravel"), Value::from("FR")]);
    artists.push_row(vec![Value::Integer(3), Value::from("Satie"), Value::Null]);
    store.insert("artists".to_string(), artists);

    let mut albums = DataTable::with_columns(["id", "artist_id", "title", "year"]);
    albums.push_row(vec![
        Value::Integer(1),
        Value::Integer(1),
        Value::from("The Planets"),
        Value::Integer(1918),
    ]);
    albums.push_row(vec![
        Value::Integer(2),
        Value::Integer(2),
        Value::from("Bolero"),
        Value::Null,
    ]);
    store.insert("albums".to_string(), albums);

    let mut notes = DataTable::with_columns(["id", "body"]);
    notes.push_row(vec![Value::Integer(1), Value::from("multi\nline\nnote")]);
    store.insert("notes".to_string(), notes);

    store
}

/// The token after `FROM`, stripped of quoting and a trailing semicolon.
fn table_name(command: &str) -> Option<String> {
    let mut tokens = command.split_whitespace();
    tokens
        .by_ref()
        .find(|t| t.eq_ignore_ascii_case("from"))?;
    let name = tokens.next()?;
    let name = name.trim_matches(|c| matches!(c, ';' | '[' | ']' | '"' | '\''));
    (!name.is_empty()).then(|| name.to_string())
}

fn make_query_view(store: &TableStore, initial: Option<&str>, bounds: Rect) -> QueryView {
    let select_store = Arc::clone(store);
    let query_fn: QueryFn = Box::new(move |command| {
        let name = table_name(command)
            .ok_or_else(|| DataError::new("expected: SELECT ... FROM <table>"))?;
        let store = select_store.lock().unwrap();
        store
            .get(&name)
            .cloned()
            .ok_or_else(|| DataError::new(format!("no such table: {name}")))
    });

    let delete_store = Arc::clone(store);
    let exec_fn: ExecFn = Box::new(move |command| {
        if !command.trim().to_lowercase().starts_with("delete") {
            return Err(DataError::new("only DELETE FROM <table> is supported"));
        }
        let name = table_name(command)
            .ok_or_else(|| DataError::new("expected: DELETE FROM <table>"))?;
        let mut store = delete_store.lock().unwrap();
        let table = store
            .get_mut(&name)
            .ok_or_else(|| DataError::new(format!("no such table: {name}")))?;
        let count = table.row_count() as u64;
        let columns: Vec<String> = (0..table.column_count())
            .filter_map(|i| table.column(i))
            .map(|c| c.name.clone())
            .collect();
        *table = DataTable::with_columns(columns);
        Ok(count)
    });

    QueryView::new(initial, query_fn, exec_fn, bounds)
}

/// The opening statement for a table, one bracketed column per line.
fn select_statement(table: &DataTable, name: &str) -> String {
    let mut sql = String::from("SELECT ");
    for i in 0..table.column_count() {
        if let Some(col) = table.column(i) {
            if i > 0 {
                sql.push_str(",\n       ");
            }
            let _ = write!(sql, "[{}]", col.name);
        }
    }
    let _ = write!(sql, "\nFROM {name}");
    sql
}

fn view_bounds(workspace: &Workspace<AppView>) -> Rect {
    // One row of title chrome above, one row of menu below.
    Rect::new(
        0,
        1,
        workspace.screen().width(),
        workspace.screen().height().saturating_sub(2),
    )
}

fn update_chrome(workspace: &mut Workspace<AppView>) {
    let mut menu = vec![
        MenuItem::new("F1", "Tables"),
        MenuItem::new("F2", "New Query"),
    ];
    if workspace.active_index() == 0 {
        workspace.set_title(" Tables ");
        menu.push(MenuItem::new(" Enter", "View Table"));
    } else {
        workspace.set_title(" Query ");
        menu.push(MenuItem::new(" F3", "Previous"));
        menu.push(MenuItem::new(" F4", "Next"));
        menu.push(MenuItem::new(" F5", "Run"));
        menu.push(MenuItem::new(" F8", "Close"));
        menu.push(MenuItem::new(" Tab", "Switch Editor/Result"));
    }
    workspace.set_menu(menu);
}

fn main() -> io::Result<()> {
    let store: TableStore = Arc::new(Mutex::new(demo_store()));

    let mut workspace: Workspace<AppView> = Workspace::new(80, 24);
    workspace.set_exit_item(Some(MenuItem::new("F10", "Exit")));

    let mut tables = ListView::new(Rect::new(0, 1, 80, 22));
    tables.begin_update();
    for name in store.lock().unwrap().keys() {
        tables.push(name.clone());
    }
    tables.end_update();
    workspace.push_view(AppView::Tables(tables));
    update_chrome(&mut workspace);

    let shell = Shell::start(&ShellConfig::default(), workspace)?;
    {
        let mut ws = shell.workspace();
        let _ = ws.draw();
        let _ = ws.flush();
    }

    loop {
        match shell.next_event() {
            InputEvent::Key(key) => {
                let mut ws = shell.workspace();
                ws.handle_key(&key);

                match key.code {
                    KeyCode::F(10) => break,

                    KeyCode::F(1) => {
                        ws.activate(0);
                        update_chrome(&mut ws);
                    }

                    KeyCode::F(2) => {
                        let bounds = view_bounds(&ws);
                        let view = make_query_view(&store, None, bounds);
                        let index = ws.push_view(AppView::Query(view));
                        ws.activate(index);
                        update_chrome(&mut ws);
                    }

                    KeyCode::Enter if ws.active_index() == 0 => {
                        let selected = match ws.view_mut(0) {
                            Some(AppView::Tables(list)) => {
                                list.selected_item().map(str::to_string)
                            }
                            _ => None,
                        };
                        if let Some(name) = selected {
                            let initial = store
                                .lock()
                                .unwrap()
                                .get(&name)
                                .map(|t| select_statement(t, &name));
                            let bounds = view_bounds(&ws);
                            let view =
                                make_query_view(&store, initial.as_deref(), bounds);
                            let index = ws.push_view(AppView::Query(view));
                            ws.activate(index);
                            update_chrome(&mut ws);
                        }
                    }

                    KeyCode::F(3) if ws.active_index() > 1 => {
                        let index = ws.active_index() - 1;
                        ws.activate(index);
                    }

                    KeyCode::F(4)
                        if ws.active_index() >= 1
                            && ws.active_index() + 1 < ws.view_count() =>
                    {
                        let index = ws.active_index() + 1;
                        ws.activate(index);
                    }

                    KeyCode::F(8) if ws.active_index() >= 1 => {
                        let index = ws.active_index();
                        ws.remove_view(index);
                        update_chrome(&mut ws);
                    }

                    _ => {}
                }

                let _ = ws.draw();
                let _ = ws.flush();
            }

            InputEvent::Resize { width, height } => {
                shell.workspace().resize(width, height);
            }

            InputEvent::Error(_) | InputEvent::Shutdown => break,
        }
    }

    Ok(())
}
