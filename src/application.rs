use std::time::Duration;

use chrono::NaiveDate;

use cosmic::app::{Core, Task as CosmicTask};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, nav_bar, row, text};
use cosmic::{Application, Element, executor};

use crate::components;
use crate::config::{TaskFlowConfig, ThemePreference};
use crate::core::task::Task;
use crate::fl;
use crate::message::{Message, NavPage};
use crate::pages;
use crate::remote::{RemoteError, Session, SupabaseClient};
use crate::route::{self, Guard, Route};
use crate::session::AppContext;
use crate::state::{Completion, Epoch};
use crate::state::auth_form::{AuthForm, AuthMode};
use crate::state::dashboard::DashboardState;
use crate::state::task_editor::{EditorPhase, TaskEditor};
use crate::state::task_list::TaskListState;
use crate::state::toast::Toasts;

pub struct Flags {
    pub config: TaskFlowConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
    pub initial_route: Route,
}

pub struct TaskFlow {
    core: Core,
    nav_model: nav_bar::Model,
    config: TaskFlowConfig,
    cosmic_config: cosmic::cosmic_config::Config,
    client: Option<SupabaseClient>,
    context: AppContext,

    // Routing. `epoch` changes on every screen activation.
    route: Route,
    epoch: Epoch,

    // Screens
    auth_form: AuthForm,
    dashboard: DashboardState,
    task_list: TaskListState,
    editor: TaskEditor,
    settings_url: String,
    settings_anon_key: String,

    signing_out: bool,
    toasts: Toasts,
}

impl Application for TaskFlow {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = crate::config::APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;

        let mut nav_model = nav_bar::Model::default();
        for page in NavPage::ALL {
            nav_model
                .insert()
                .text(page.title())
                .icon(icon::from_name(page.icon_name()).icon())
                .data(*page);
        }

        let client = build_client(&config);
        // Nothing to sign in to until the backend is set up
        let route = if client.is_none() { Route::Settings } else { flags.initial_route };

        let mut app = Self {
            core,
            nav_model,
            context: AppContext::new(config.theme),
            settings_url: config.supabase_url.clone(),
            settings_anon_key: config.supabase_anon_key.clone(),
            config,
            cosmic_config: flags.cosmic_config,
            client,
            route,
            epoch: Epoch::default(),
            auth_form: AuthForm::new(AuthMode::SignIn),
            dashboard: DashboardState::default(),
            task_list: TaskListState::default(),
            editor: TaskEditor::create(),
            signing_out: false,
            toasts: Toasts::default(),
        };

        let theme = cosmic::command::set_theme(theme_for(app.context.theme()));
        let restore = app.restore_session();
        let enter = app.activate();

        (app, CosmicTask::batch([theme, restore, enter]))
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        self.context.session().map(|_| &self.nav_model)
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> CosmicTask<Message> {
        if let Some(page) = self.nav_model.data::<NavPage>(id).cloned() {
            return self.navigate(page.route());
        }
        CosmicTask::none()
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        let theme_icon = match self.context.theme() {
            ThemePreference::Light => "weather-clear-night-symbolic",
            ThemePreference::Dark => "weather-clear-symbolic",
        };

        let mut header_row = row().spacing(8).align_y(Alignment::Center);

        if let Some(session) = self.context.session() {
            header_row = header_row.push(text::body(session.email().to_string()));
        }

        header_row = header_row
            .push(button::icon(icon::from_name(theme_icon)).on_press(Message::ToggleTheme))
            .push(
                button::icon(icon::from_name("emblem-system-symbolic"))
                    .on_press(Message::Navigate(Route::Settings)),
            );

        if self.context.session().is_some() {
            let mut sign_out = button::standard(fl!("header-sign-out"));
            if !self.signing_out {
                sign_out = sign_out.on_press(Message::SignOut);
            }
            header_row = header_row.push(sign_out);
        }

        vec![header_row.into()]
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        if self.editor.phase() == EditorPhase::ConfirmDelete {
            self.editor.cancel_delete();
        }
        CosmicTask::none()
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::Navigate(route) => {
                return self.navigate(route);
            }

            // --- Session ---
            Message::SessionRestored(result) => {
                let session = match result {
                    Ok(session) => session,
                    Err(e) => {
                        log::error!("Failed to restore session: {}", e);
                        self.toasts.error(fl!("toast-session-restore-failed"));
                        None
                    }
                };
                let before = self.context.auth().clone();
                self.context.resolved(session);
                if route::reenter_after_resolve(self.route, &before, self.context.auth()) {
                    return self.activate();
                }
            }

            Message::SessionRefreshed(session, then) => {
                if self.context.refreshed(session) {
                    log::debug!("Access token renewed");
                }
                return self.update(*then);
            }

            Message::SignOut => {
                if self.signing_out {
                    return CosmicTask::none();
                }
                let Some((client, session)) = self.remote() else {
                    self.context.signed_out();
                    return self.navigate(Route::Login);
                };
                self.signing_out = true;
                return CosmicTask::perform(
                    async move {
                        // Revoke the live token when it can still be renewed
                        let session = match client.fresh_session(&session).await {
                            Ok(fresh) => fresh,
                            Err(_) => session,
                        };
                        client.sign_out(&session).await
                    },
                    |result| cosmic::Action::App(Message::SignedOut(result)),
                );
            }

            Message::SignedOut(result) => {
                self.signing_out = false;
                match result {
                    Ok(()) => {
                        self.context.signed_out();
                        self.toasts.success(fl!("toast-signed-out"));
                        return self.navigate(Route::Login);
                    }
                    Err(e) => {
                        log::error!("Sign out failed: {}", e);
                        self.toasts.error(fl!("toast-sign-out-failed"));
                    }
                }
            }

            Message::PreviousBackendSignedOut(result) => {
                if let Err(e) = result {
                    log::warn!("Could not revoke session on previous backend: {}", e);
                }
                return self.restore_session();
            }

            Message::ToggleTheme => {
                let theme = self.context.toggle_theme();
                self.config.theme = theme;
                self.save_key("theme", theme);
                return cosmic::command::set_theme(theme_for(theme));
            }

            // --- Sign in / register ---
            Message::AuthEmailChanged(value) => self.auth_form.set_email(value),
            Message::AuthPasswordChanged(value) => self.auth_form.set_password(value),
            Message::AuthConfirmChanged(value) => self.auth_form.set_confirm_password(value),

            Message::AuthSubmit => {
                let Some(credentials) = self.auth_form.submit() else {
                    return CosmicTask::none();
                };
                let Some(client) = self.client.clone() else {
                    self.auth_form.failed();
                    self.toasts.error(fl!("toast-backend-not-configured"));
                    return CosmicTask::none();
                };
                let epoch = self.epoch;
                return match self.auth_form.mode {
                    AuthMode::SignIn => CosmicTask::perform(
                        async move { client.sign_in(&credentials.email, &credentials.password).await },
                        move |result| cosmic::Action::App(Message::SignedIn(epoch, result)),
                    ),
                    AuthMode::SignUp => CosmicTask::perform(
                        async move { client.sign_up(&credentials.email, &credentials.password).await },
                        move |result| cosmic::Action::App(Message::SignedUp(epoch, result)),
                    ),
                };
            }

            Message::SignedIn(epoch, result) => match result {
                Ok(session) => {
                    self.context.signed_in(session);
                    self.toasts.success(fl!("toast-welcome"));
                    return self.navigate(Route::Dashboard);
                }
                Err(e) => self.auth_failed(epoch, e),
            },

            Message::SignedUp(epoch, result) => match result {
                Ok(Some(session)) => {
                    self.context.signed_in(session);
                    self.toasts.success(fl!("toast-account-created"));
                    return self.navigate(Route::Dashboard);
                }
                Ok(None) => {
                    self.toasts.info(fl!("toast-confirm-email"));
                    return self.navigate(Route::Login);
                }
                Err(e) => self.auth_failed(epoch, e),
            },

            // --- Dashboard ---
            Message::DashboardLoaded(epoch, result) => {
                if !self.is_current(epoch, "dashboard") {
                    return CosmicTask::none();
                }
                match result {
                    Ok(tasks) => self.dashboard.loaded(&tasks, today()),
                    Err(e) => {
                        log::error!("Failed to load dashboard: {}", e);
                        self.dashboard.load_failed();
                        self.toasts.error(fl!("toast-dashboard-failed"));
                    }
                }
            }

            // --- Task list ---
            Message::TasksLoaded(epoch, result) => {
                if !self.is_current(epoch, "task list") {
                    return CosmicTask::none();
                }
                match result {
                    Ok(tasks) => self.task_list.loaded(tasks),
                    Err(e) => {
                        log::error!("Failed to load tasks: {}", e);
                        self.task_list.load_failed();
                        self.toasts.error(fl!("toast-tasks-failed"));
                    }
                }
            }

            Message::SearchChanged(query) => self.task_list.set_query(query),
            Message::StatusFilter(choice) => self.task_list.set_status(choice),
            Message::PriorityFilter(choice) => self.task_list.set_priority(choice),
            Message::SetViewMode(mode) => self.task_list.set_view_mode(mode),

            // --- Task form ---
            Message::TaskLoaded(epoch, result) => {
                if !self.is_current(epoch, "task") {
                    return CosmicTask::none();
                }
                match result {
                    Ok(Some(task)) => self.editor.loaded(&task),
                    Ok(None) => {
                        self.toasts.error(fl!("toast-task-not-found"));
                        return self.navigate(Route::Tasks);
                    }
                    Err(e) => {
                        log::error!("Failed to load task: {}", e);
                        self.toasts.error(fl!("toast-task-load-failed"));
                        return self.navigate(Route::Tasks);
                    }
                }
            }

            Message::FormTitle(value) => self.editor.set_title(value),
            Message::FormDescription(value) => self.editor.set_description(value),
            Message::FormPriority(priority) => self.editor.set_priority(priority),
            Message::FormStatus(status) => self.editor.set_status(status),
            Message::FormDueDate(value) => self.editor.set_due_date(value),

            Message::FormSubmit => {
                let Some(fields) = self.editor.submit(today()) else {
                    return CosmicTask::none();
                };
                let Some((client, session)) = self.remote() else {
                    self.editor.save_failed();
                    return CosmicTask::none();
                };
                let epoch = self.epoch;
                return match self.editor.task_id() {
                    None => owner_call(
                        client,
                        session,
                        move |client, session| async move { client.create_task(&fields, &session).await },
                        move |result| Message::TaskCreated(epoch, result),
                    ),
                    Some(id) => owner_call(
                        client,
                        session,
                        move |client, session| async move {
                            client.update_task(id, &fields, &session).await
                        },
                        move |result| Message::TaskUpdated(epoch, result),
                    ),
                };
            }

            Message::TaskCreated(epoch, result) => {
                match &result {
                    Ok(task) => {
                        log::debug!("Created task {}", task.id);
                        self.toasts.success(fl!("toast-task-created"));
                    }
                    Err(e) => {
                        log::error!("Failed to create task: {}", e);
                        self.toasts.error(fl!("toast-create-failed"));
                    }
                }
                return self.complete_save(epoch, result.is_ok());
            }

            Message::TaskUpdated(epoch, result) => {
                match &result {
                    Ok(()) => {
                        self.toasts.success(fl!("toast-task-updated"));
                    }
                    Err(e) => {
                        log::error!("Failed to update task: {}", e);
                        self.toasts.error(fl!("toast-update-failed"));
                    }
                }
                return self.complete_save(epoch, result.is_ok());
            }

            Message::RequestDelete => self.editor.request_delete(),
            Message::CancelDelete => self.editor.cancel_delete(),

            Message::ConfirmDelete => {
                let Some(id) = self.editor.confirm_delete() else {
                    return CosmicTask::none();
                };
                let Some((client, session)) = self.remote() else {
                    self.editor.delete_failed();
                    return CosmicTask::none();
                };
                let epoch = self.epoch;
                return owner_call(
                    client,
                    session,
                    move |client, session| async move { client.delete_task(id, &session).await },
                    move |result| Message::TaskDeleted(epoch, result),
                );
            }

            Message::TaskDeleted(epoch, result) => {
                match &result {
                    Ok(()) => {
                        self.toasts.success(fl!("toast-task-deleted"));
                    }
                    Err(e) => {
                        log::error!("Failed to delete task: {}", e);
                        self.toasts.error(fl!("toast-delete-failed"));
                    }
                }
                match Completion::decide(epoch, self.epoch, result.is_ok()) {
                    Completion::ReturnToList => return self.navigate(Route::Tasks),
                    Completion::Reopen => self.editor.delete_failed(),
                    Completion::NotifyOnly => log::debug!("Delete finished after leaving the form"),
                }
            }

            // --- Settings ---
            Message::SettingsUrlChanged(value) => self.settings_url = value,
            Message::SettingsAnonKeyChanged(value) => self.settings_anon_key = value,

            Message::SaveBackendSettings => {
                let url = self.settings_url.trim().to_string();
                let anon_key = self.settings_anon_key.trim().to_string();
                let changed = url != self.config.supabase_url || anon_key != self.config.supabase_anon_key;

                self.config.supabase_url = url;
                self.config.supabase_anon_key = anon_key;
                self.config.save(&self.cosmic_config);

                let mut switch = CosmicTask::none();
                if changed {
                    log::info!("Backend settings changed");
                    // A session belongs to the backend that issued it
                    let previous_session = self.context.backend_changed();
                    let previous = std::mem::replace(&mut self.client, build_client(&self.config));
                    switch = match previous {
                        // The new backend is looked up once the old one has let go
                        Some(previous) => CosmicTask::perform(
                            async move {
                                match previous_session {
                                    Some(session) => previous.sign_out(&session).await,
                                    None => {
                                        previous.forget_session().await;
                                        Ok(())
                                    }
                                }
                            },
                            |result| cosmic::Action::App(Message::PreviousBackendSignedOut(result)),
                        ),
                        None => self.restore_session(),
                    };
                }

                if self.client.is_some() {
                    self.toasts.success(fl!("toast-settings-saved"));
                } else {
                    self.toasts.error(fl!("toast-backend-not-configured"));
                }
                return switch;
            }

            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                taskflow::set_debug_logging(self.config.debug_logging);
                self.save_key("debug_logging", self.config.debug_logging);
            }

            // --- Notifications ---
            Message::Tick(now) => {
                self.toasts.prune(now);
            }

            Message::DismissToast(id) => self.toasts.dismiss(id),
        }

        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        let keys = cosmic::iced::event::listen_with(|event, _status, _id| {
            match event {
                cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                    key: cosmic::iced::keyboard::Key::Character(ref c),
                    modifiers,
                    ..
                }) if c.as_str() == "n" && modifiers.control() => {
                    Some(Message::Navigate(Route::NewTask))
                }
                _ => None,
            }
        });

        if self.toasts.is_empty() {
            keys
        } else {
            cosmic::iced::Subscription::batch([
                keys,
                cosmic::iced::time::every(Duration::from_millis(500)).map(Message::Tick),
            ])
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let today = today();

        let page: Element<'_, Message> = match route::guard(self.route, self.context.auth()) {
            Guard::Loading | Guard::Redirect(_) => container(text::body(fl!("loading")))
                .padding(32)
                .center_x(Length::Fill)
                .width(Length::Fill)
                .into(),
            Guard::Allow(route) => match route {
                Route::Login | Route::Register => pages::auth::auth_view(&self.auth_form),
                Route::Dashboard => {
                    let email = self.context.session().map(Session::email).unwrap_or_default();
                    pages::dashboard::dashboard_view(&self.dashboard, email, today)
                }
                Route::Tasks => pages::tasks::tasks_view(&self.task_list, today),
                Route::NewTask | Route::EditTask(_) => pages::task_form::task_form_view(&self.editor),
                Route::Settings => pages::settings::settings_view(
                    &self.config,
                    &self.context,
                    &self.settings_url,
                    &self.settings_anon_key,
                ),
            },
        };

        let mut content = column()
            .push(container(page).width(Length::Fill).height(Length::Fill));
        if let Some(toasts) = components::toast::toast_stack(&self.toasts) {
            content = content.push(container(toasts).padding(8));
        }
        content.into()
    }
}

impl TaskFlow {
    fn navigate(&mut self, route: Route) -> CosmicTask<Message> {
        self.route = route;
        self.activate()
    }

    /// Enter the current route under a fresh epoch, applying the session guard.
    fn activate(&mut self) -> CosmicTask<Message> {
        self.epoch = self.epoch.next();
        match route::guard(self.route, self.context.auth()) {
            Guard::Loading => CosmicTask::none(),
            Guard::Redirect(target) => {
                log::debug!("Redirecting {} to {}", self.route.path(), target.path());
                self.route = target;
                self.activate()
            }
            Guard::Allow(route) => {
                self.sync_nav();
                self.enter(route)
            }
        }
    }

    fn enter(&mut self, route: Route) -> CosmicTask<Message> {
        match route {
            Route::Login => {
                self.auth_form = AuthForm::new(AuthMode::SignIn);
                CosmicTask::none()
            }
            Route::Register => {
                self.auth_form = AuthForm::new(AuthMode::SignUp);
                CosmicTask::none()
            }
            Route::Dashboard => {
                self.dashboard = DashboardState::default();
                self.fetch_tasks(Message::DashboardLoaded)
            }
            Route::Tasks => {
                self.task_list = TaskListState::default();
                self.fetch_tasks(Message::TasksLoaded)
            }
            Route::NewTask => {
                self.editor = TaskEditor::create();
                CosmicTask::none()
            }
            Route::EditTask(id) if id.is_nil() => {
                self.toasts.error(fl!("toast-task-not-found"));
                self.navigate(Route::Tasks)
            }
            Route::EditTask(id) => {
                self.editor = TaskEditor::edit(id);
                let Some((client, session)) = self.remote() else {
                    return CosmicTask::none();
                };
                let epoch = self.epoch;
                owner_call(
                    client,
                    session,
                    move |client, session| async move { client.get_task(id, &session).await },
                    move |result| Message::TaskLoaded(epoch, result),
                )
            }
            Route::Settings => {
                self.settings_url = self.config.supabase_url.clone();
                self.settings_anon_key = self.config.supabase_anon_key.clone();
                CosmicTask::none()
            }
        }
    }

    fn sync_nav(&mut self) {
        let Some(page) = NavPage::for_route(self.route) else {
            return;
        };
        let target = self
            .nav_model
            .iter()
            .find(|&id| self.nav_model.data::<NavPage>(id) == Some(&page));
        if let Some(id) = target {
            self.nav_model.activate(id);
        }
    }

    /// Look up the session left by a previous run.
    fn restore_session(&mut self) -> CosmicTask<Message> {
        self.context.begin_resolve();
        let Some(client) = self.client.clone() else {
            self.context.resolved(None);
            return CosmicTask::none();
        };
        CosmicTask::perform(
            async move { client.get_session().await },
            |result| cosmic::Action::App(Message::SessionRestored(result)),
        )
    }

    fn fetch_tasks(
        &self,
        done: fn(Epoch, Result<Vec<Task>, RemoteError>) -> Message,
    ) -> CosmicTask<Message> {
        let Some((client, session)) = self.remote() else {
            return CosmicTask::none();
        };
        let epoch = self.epoch;
        owner_call(
            client,
            session,
            |client, session| async move { client.list_tasks(&session).await },
            move |result| done(epoch, result),
        )
    }

    fn complete_save(&mut self, epoch: Epoch, succeeded: bool) -> CosmicTask<Message> {
        match Completion::decide(epoch, self.epoch, succeeded) {
            Completion::ReturnToList => self.navigate(Route::Tasks),
            Completion::Reopen => {
                self.editor.save_failed();
                CosmicTask::none()
            }
            Completion::NotifyOnly => {
                log::debug!("Save finished after leaving the form");
                CosmicTask::none()
            }
        }
    }

    /// Client and session for an owner-scoped call.
    fn remote(&self) -> Option<(SupabaseClient, Session)> {
        let client = self.client.clone();
        let session = self.context.session().cloned();
        if client.is_none() || session.is_none() {
            log::warn!("Remote call skipped: no backend or no session");
        }
        Some((client?, session?))
    }

    fn is_current(&self, epoch: Epoch, what: &str) -> bool {
        let current = epoch.is_current(self.epoch);
        if !current {
            log::debug!("Dropping stale {} result", what);
        }
        current
    }

    fn auth_failed(&mut self, epoch: Epoch, error: RemoteError) {
        log::error!("Authentication failed: {}", error);
        if epoch.is_current(self.epoch) {
            self.auth_form.failed();
        }
        self.toasts.error(error.user_message());
    }

    fn save_key<T: serde::Serialize>(&self, key: &str, value: T) {
        use cosmic::cosmic_config::ConfigSet;
        if let Err(e) = self.cosmic_config.set(key, value) {
            log::error!("Failed to save {}: {:?}", key, e);
        }
    }
}

/// Run an owner-scoped call, renewing the access token first when it is about
/// to expire. A renewed session travels back ahead of the call's result.
fn owner_call<T, F, Fut, D>(client: SupabaseClient, session: Session, call: F, done: D) -> CosmicTask<Message>
where
    T: Send + 'static,
    F: FnOnce(SupabaseClient, Session) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, RemoteError>> + Send + 'static,
    D: FnOnce(Result<T, RemoteError>) -> Message + Send + 'static,
{
    CosmicTask::perform(
        async move {
            let fresh = match client.fresh_session(&session).await {
                Ok(fresh) => fresh,
                Err(e) => {
                    log::error!("Failed to renew session: {}", e);
                    return done(Err(e));
                }
            };
            let renewed = fresh != session;
            let message = done(call(client, fresh.clone()).await);
            if renewed {
                Message::SessionRefreshed(fresh, Box::new(message))
            } else {
                message
            }
        },
        cosmic::Action::App,
    )
}

fn build_client(config: &TaskFlowConfig) -> Option<SupabaseClient> {
    match SupabaseClient::from_config(config) {
        Ok(client) => Some(client),
        Err(RemoteError::NotConfigured) => {
            log::info!("Backend not configured");
            None
        }
        Err(e) => {
            log::error!("Failed to set up backend client: {}", e);
            None
        }
    }
}

fn theme_for(preference: ThemePreference) -> cosmic::Theme {
    if preference.is_dark() {
        cosmic::Theme::dark()
    } else {
        cosmic::Theme::light()
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
