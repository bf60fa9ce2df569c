use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::dto::{LogoutOutcome, SignInRequest, SignInResponse};
use crate::application::use_cases::{CheckSessionUseCase, LogoutUseCase, SignInUseCase};
use crate::domain::entities::{TaskId, User};
use crate::domain::errors::ApiError;
use crate::domain::ports::{RoutinesPort, SessionPort, SessionStoragePort};
use crate::presentation::ui::page::{PageRequest, PageResult, PageTicket};

/// Results the worker hands back to the UI loop.
#[derive(Debug)]
pub enum Action {
    SessionChecked(Option<User>),
    SignInSucceeded(SignInResponse),
    SignInFailed(ApiError),
    StoredSessionForgotten(Result<(), ApiError>),
    LoggedOut(LogoutOutcome),
    Page {
        ticket: PageTicket,
        result: PageResult,
    },
}

#[derive(Debug)]
pub enum BackendCommand {
    CheckSession,
    SignIn(SignInRequest),
    ForgetStoredSession,
    Logout,
    Page {
        ticket: PageTicket,
        request: PageRequest,
    },
}

/// Executes commands against the ports.
pub struct CommandHandler {
    routines: Arc<dyn RoutinesPort>,
    check_session: CheckSessionUseCase,
    sign_in: SignInUseCase,
    logout: LogoutUseCase,
}

impl CommandHandler {
    pub fn new(
        session_port: Arc<dyn SessionPort>,
        routines: Arc<dyn RoutinesPort>,
        storage_port: Arc<dyn SessionStoragePort>,
    ) -> Self {
        Self {
            routines,
            check_session: CheckSessionUseCase::new(session_port.clone()),
            sign_in: SignInUseCase::new(session_port.clone(), storage_port.clone()),
            logout: LogoutUseCase::new(session_port, storage_port),
        }
    }

    pub async fn handle(&self, command: BackendCommand) -> Action {
        match command {
            BackendCommand::CheckSession => Action::SessionChecked(self.check_session.execute().await),
            BackendCommand::SignIn(request) => match self.sign_in.execute(request).await {
                Ok(response) => Action::SignInSucceeded(response),
                Err(e) => {
                    warn!(error = %e, "Sign-in failed");
                    Action::SignInFailed(e)
                }
            },
            BackendCommand::ForgetStoredSession => {
                Action::StoredSessionForgotten(self.sign_in.forget_stored_session().await)
            }
            BackendCommand::Logout => Action::LoggedOut(self.logout.execute().await),
            BackendCommand::Page { ticket, request } => Action::Page {
                ticket,
                result: self.handle_page(request).await,
            },
        }
    }

    async fn handle_page(&self, request: PageRequest) -> PageResult {
        match request {
            PageRequest::ListTasks => {
                let result = self.routines.list_tasks().await;
                match &result {
                    Ok(tasks) => debug!(count = tasks.len(), "Loaded tasks"),
                    Err(e) => log_failure("list_tasks", None, e),
                }
                PageResult::TasksLoaded(result)
            }
            PageRequest::AddTask(title) => {
                let result = self.routines.add_task(&title).await;
                if let Err(e) = &result {
                    log_failure("add_task", None, e);
                }
                PageResult::TaskAdded(result)
            }
            PageRequest::RenameTask { id, title } => {
                let result = self.routines.update_task(id, &title).await;
                if let Err(e) = &result {
                    log_failure("update_task", Some(id), e);
                }
                PageResult::TaskRenamed { id, result }
            }
            PageRequest::SetStatus { id, status } => {
                let result = self.routines.update_task_status(id, status).await;
                if let Err(e) = &result {
                    log_failure("update_task_status", Some(id), e);
                }
                PageResult::TaskStatusChanged { id, result }
            }
            PageRequest::DeleteTask(id) => {
                let result = self.routines.delete_task(id).await;
                if let Err(e) = &result {
                    log_failure("delete_task", Some(id), e);
                }
                PageResult::TaskDeleted { id, result }
            }
        }
    }
}

fn log_failure(operation: &'static str, task_id: Option<TaskId>, e: &ApiError) {
    if e.is_validation() {
        debug!(operation, ?task_id, error = %e, "Rejected before sending");
    } else if e.is_network_error() {
        warn!(operation, ?task_id, error = %e, "Backend unreachable");
    } else {
        warn!(operation, ?task_id, error = %e, "Request failed");
    }
}

/// Background worker. Each command runs on its own task and results arrive
/// in completion order.
pub struct Backend {
    handler: Arc<CommandHandler>,
    command_rx: mpsc::UnboundedReceiver<BackendCommand>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Backend {
    pub fn new(
        handler: CommandHandler,
        command_rx: mpsc::UnboundedReceiver<BackendCommand>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            handler: Arc::new(handler),
            command_rx,
            action_tx,
        }
    }

    pub async fn run(mut self) {
        info!("Backend worker started");
        while let Some(command) = self.command_rx.recv().await {
            let handler = self.handler.clone();
            let action_tx = self.action_tx.clone();
            tokio::spawn(async move {
                let action = handler.handle(command).await;
                let _ = action_tx.send(action);
            });
        }
        info!("Backend worker stopped");
    }

    #[cfg(test)]
    pub fn try_next_command(&mut self) -> Option<BackendCommand> {
        self.command_rx.try_recv().ok()
    }

    #[cfg(test)]
    pub fn handler(&self) -> Arc<CommandHandler> {
        self.handler.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::SessionSource;
    use crate::domain::entities::{Task, TaskId, TaskStatus};
    use crate::domain::navigation::Page;
    use crate::domain::ports::mocks::{MockRoutinesPort, MockSessionPort, MockSessionStorage};

    fn handler(routines: MockRoutinesPort, me_succeeds: bool) -> CommandHandler {
        CommandHandler::new(
            Arc::new(MockSessionPort::new(me_succeeds)),
            Arc::new(routines),
            Arc::new(MockSessionStorage::new()),
        )
    }

    fn ticket() -> PageTicket {
        PageTicket {
            page: Page::Tasks,
            mount: 3,
        }
    }

    #[tokio::test]
    async fn test_list_tasks_keeps_ticket() {
        let mut routines = MockRoutinesPort::new();
        routines.expect_list_tasks().times(1).returning(|| {
            Ok(vec![Task::new(1, "Treino", "2024-06-05T10:00:00", TaskStatus::Pending)])
        });

        let action = handler(routines, true)
            .handle(BackendCommand::Page {
                ticket: ticket(),
                request: PageRequest::ListTasks,
            })
            .await;

        match action {
            Action::Page {
                ticket: t,
                result: PageResult::TasksLoaded(Ok(tasks)),
            } => {
                assert_eq!(t, ticket());
                assert_eq!(tasks.len(), 1);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_status_change_passes_id_and_status() {
        let mut routines = MockRoutinesPort::new();
        routines
            .expect_update_task_status()
            .withf(|id, status| *id == TaskId(4) && *status == TaskStatus::Done)
            .times(1)
            .returning(|id, status| Ok(Task::new(id, "Ler", "2024-06-05T10:00:00", status)));

        let action = handler(routines, true)
            .handle(BackendCommand::Page {
                ticket: ticket(),
                request: PageRequest::SetStatus {
                    id: TaskId(4),
                    status: TaskStatus::Done,
                },
            })
            .await;

        assert!(matches!(
            action,
            Action::Page {
                result: PageResult::TaskStatusChanged { id: TaskId(4), result: Ok(_) },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_delete_error_is_forwarded() {
        let mut routines = MockRoutinesPort::new();
        routines
            .expect_delete_task()
            .times(1)
            .returning(|_| Err(ApiError::server(404, "Task not found")));

        let action = handler(routines, true)
            .handle(BackendCommand::Page {
                ticket: ticket(),
                request: PageRequest::DeleteTask(TaskId(9)),
            })
            .await;

        match action {
            Action::Page {
                result: PageResult::TaskDeleted { id, result: Err(e) },
                ..
            } => {
                assert_eq!(id, TaskId(9));
                assert_eq!(e.to_string(), "Task not found");
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sign_in_rejected() {
        let action = handler(MockRoutinesPort::new(), false)
            .handle(BackendCommand::SignIn(SignInRequest::new(
                "abc123".to_string(),
                SessionSource::UserInput,
            )))
            .await;

        assert!(matches!(action, Action::SignInFailed(_)));
    }

    #[tokio::test]
    async fn test_logout_reports_outcome() {
        let action = handler(MockRoutinesPort::new(), true)
            .handle(BackendCommand::Logout)
            .await;

        assert!(matches!(
            action,
            Action::LoggedOut(LogoutOutcome {
                server_acknowledged: true
            })
        ));
    }

    #[tokio::test]
    async fn test_run_sends_results_back() {
        let mut routines = MockRoutinesPort::new();
        routines.expect_list_tasks().returning(|| Ok(Vec::new()));

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let backend = Backend::new(handler(routines, true), command_rx, action_tx);
        let worker = tokio::spawn(backend.run());

        command_tx
            .send(BackendCommand::Page {
                ticket: ticket(),
                request: PageRequest::ListTasks,
            })
            .unwrap();

        let action = action_rx.recv().await.unwrap();
        assert!(matches!(
            action,
            Action::Page {
                result: PageResult::TasksLoaded(Ok(_)),
                ..
            }
        ));

        drop(command_tx);
        worker.await.unwrap();
    }
}
