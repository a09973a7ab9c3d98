// TUI view state wrapped around the immutable browsing state
use starview_core::{Command, FetchOutcome, Language, PopularState, Repository};

pub struct App {
    pub state: PopularState,
    pub should_quit: bool,
    /// Index of the highlighted card within the current grid.
    pub selected_card: usize,
    /// First grid row currently on screen.
    pub scroll_row: usize,
    /// Column count of the last rendered grid; row navigation moves by it.
    pub columns: usize,
}

impl App {
    pub fn new(state: PopularState) -> Self {
        Self {
            state,
            should_quit: false,
            selected_card: 0,
            scroll_row: 0,
            columns: 1,
        }
    }

    /// Route a filter selection through the state machine; the caller
    /// hands the returned command to the fetch pool.
    pub fn select_language(&mut self, language: Language) -> Command {
        let (next, command) = self.state.select(language);
        self.state = next;
        self.selected_card = 0;
        self.scroll_row = 0;
        command
    }

    pub fn next_language(&mut self) -> Command {
        self.step_language(1)
    }

    pub fn previous_language(&mut self) -> Command {
        self.step_language(Language::ALL.len() - 1)
    }

    fn step_language(&mut self, step: usize) -> Command {
        let current = Language::ALL
            .iter()
            .position(|l| *l == self.state.selected())
            .unwrap_or(0);
        let next = Language::ALL[(current + step) % Language::ALL.len()];
        self.select_language(next)
    }

    /// Re-select the current filter; after a failure this re-issues the
    /// fetch, otherwise it is a no-op render from cache.
    pub fn retry(&mut self) -> Command {
        self.select_language(self.state.selected())
    }

    pub fn apply(&mut self, outcome: FetchOutcome) {
        self.state = self.state.apply(outcome);
        self.clamp_selection();
    }

    pub fn repo_count(&self) -> usize {
        self.state.repos().map_or(0, |repos| repos.len())
    }

    pub fn selected_repo(&self) -> Option<&Repository> {
        self.state.repos()?.get(self.selected_card)
    }

    /// Move the card highlight one grid row down.
    pub fn next_row(&mut self) {
        let count = self.repo_count();
        if count == 0 {
            return;
        }
        let next = self.selected_card + self.columns;
        if next < count {
            self.selected_card = next;
        }
    }

    /// Move the card highlight one grid row up.
    pub fn previous_row(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(self.columns);
    }

    pub fn next_card(&mut self) {
        if self.selected_card + 1 < self.repo_count() {
            self.selected_card += 1;
        }
    }

    pub fn previous_card(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.repo_count();
        if count == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= count {
            self.selected_card = count - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starview_core::Owner;

    fn repo(name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            owner: Owner {
                login: format!("{}-owner", name),
                avatar_url: String::new(),
            },
            url: format!("https://github.com/{0}-owner/{0}", name),
            stars: 1,
            forks: 1,
            open_issues: 1,
        }
    }

    fn app_with(repos: Vec<Repository>) -> App {
        let (state, _) = PopularState::mount(Language::All);
        let state = state.apply(FetchOutcome {
            language: Language::All,
            result: Ok(repos),
        });
        App::new(state)
    }

    #[test]
    fn language_stepping_wraps_both_ways() {
        let mut app = App::new(PopularState::mount(Language::All).0);

        app.next_language();
        assert_eq!(app.state.selected(), Language::JavaScript);

        app.previous_language();
        app.previous_language();
        assert_eq!(app.state.selected(), Language::Python);

        app.next_language();
        assert_eq!(app.state.selected(), Language::All);
    }

    #[test]
    fn row_navigation_moves_by_column_count_and_stays_in_bounds() {
        let mut app = app_with(vec![
            repo("a"),
            repo("b"),
            repo("c"),
            repo("d"),
            repo("e"),
        ]);
        app.columns = 2;

        app.next_row();
        assert_eq!(app.selected_card, 2);
        app.next_card();
        assert_eq!(app.selected_card, 3);
        app.next_row();
        // Row below holds no card at that column; stay put.
        assert_eq!(app.selected_card, 3);
        app.previous_row();
        assert_eq!(app.selected_card, 1);
        app.previous_row();
        assert_eq!(app.selected_card, 0);
    }

    #[test]
    fn selection_is_clamped_when_results_change() {
        let mut app = app_with(vec![repo("a"), repo("b"), repo("c")]);
        app.selected_card = 2;

        app.select_language(Language::Ruby);
        assert_eq!(app.selected_card, 0);

        app.apply(FetchOutcome {
            language: Language::Ruby,
            result: Ok(vec![repo("only")]),
        });
        assert_eq!(app.selected_card, 0);
        assert_eq!(app.selected_repo().unwrap().name, "only");
    }

    #[test]
    fn selected_repo_is_none_while_loading_or_empty() {
        let app = App::new(PopularState::mount(Language::All).0);
        assert!(app.selected_repo().is_none());

        let app = app_with(Vec::new());
        assert!(app.selected_repo().is_none());
    }
}
