//! Sample users and tasks loaded at startup

use crate::core::error::MockerResult;
use crate::entities::{
    Task, TaskCreate, TaskLabel, TaskPriority, TaskStatus, User, UserCreate, UserRole, UserStatus,
};
use crate::server::AppState;
use chrono::{Duration, Utc};

struct SampleUser {
    first_name: &'static str,
    last_name: &'static str,
    username: &'static str,
    phone_number: &'static str,
    password: &'static str,
    status: UserStatus,
    role: UserRole,
}

const USERS: &[SampleUser] = &[
    SampleUser {
        first_name: "Super",
        last_name: "Admin",
        username: "superadmin",
        phone_number: "13900000001",
        password: "admin123",
        status: UserStatus::Active,
        role: UserRole::Superadmin,
    },
    SampleUser {
        first_name: "Zhang",
        last_name: "San",
        username: "zhangsan",
        phone_number: "13900000002",
        password: "user123",
        status: UserStatus::Active,
        role: UserRole::Admin,
    },
    SampleUser {
        first_name: "Li",
        last_name: "Si",
        username: "lisi",
        phone_number: "13900000003",
        password: "user123",
        status: UserStatus::Active,
        role: UserRole::Manager,
    },
    SampleUser {
        first_name: "Wang",
        last_name: "Wu",
        username: "wangwu",
        phone_number: "13900000004",
        password: "user123",
        status: UserStatus::Inactive,
        role: UserRole::Cashier,
    },
    SampleUser {
        first_name: "Zhao",
        last_name: "Liu",
        username: "zhaoliu",
        phone_number: "13900000005",
        password: "user123",
        status: UserStatus::Invited,
        role: UserRole::Cashier,
    },
    SampleUser {
        first_name: "Qian",
        last_name: "Qi",
        username: "qianqi",
        phone_number: "13900000006",
        password: "user123",
        status: UserStatus::Suspended,
        role: UserRole::Cashier,
    },
];

struct SampleTask {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    label: TaskLabel,
    priority: TaskPriority,
    /// Index into the seeded users
    assignee: Option<usize>,
    due_in_days: Option<i64>,
}

const TASKS: &[SampleTask] = &[
    SampleTask {
        title: "Finish the user management module",
        description: "Implement user CRUD with pagination, search and filters",
        status: TaskStatus::Done,
        label: TaskLabel::Feature,
        priority: TaskPriority::High,
        assignee: Some(1),
        due_in_days: Some(7),
    },
    SampleTask {
        title: "Fix the responsive layout of the login page",
        description: "The login button renders incorrectly on mobile devices",
        status: TaskStatus::Todo,
        label: TaskLabel::Bug,
        priority: TaskPriority::Medium,
        assignee: Some(2),
        due_in_days: Some(3),
    },
    SampleTask {
        title: "Write the API documentation",
        description: "Document every backend endpoint with its parameters and responses",
        status: TaskStatus::InProgress,
        label: TaskLabel::Documentation,
        priority: TaskPriority::Low,
        assignee: Some(0),
        due_in_days: None,
    },
    SampleTask {
        title: "Optimize database query performance",
        description: "Tune slow queries and add the missing indexes",
        status: TaskStatus::Backlog,
        label: TaskLabel::Feature,
        priority: TaskPriority::Critical,
        assignee: Some(1),
        due_in_days: None,
    },
    SampleTask {
        title: "Implement task export",
        description: "Export the task list to Excel and PDF",
        status: TaskStatus::Todo,
        label: TaskLabel::Feature,
        priority: TaskPriority::Medium,
        assignee: Some(2),
        due_in_days: None,
    },
    SampleTask {
        title: "Fix the permission check bug",
        description: "Users can reach unauthorized resources in some cases",
        status: TaskStatus::Done,
        label: TaskLabel::Bug,
        priority: TaskPriority::High,
        assignee: Some(0),
        due_in_days: None,
    },
    SampleTask {
        title: "Add unit tests",
        description: "Cover the core business logic with unit tests",
        status: TaskStatus::Backlog,
        label: TaskLabel::Feature,
        priority: TaskPriority::Low,
        assignee: None,
        due_in_days: None,
    },
    SampleTask {
        title: "Integrate third-party payments",
        description: "Integrate the Alipay and WeChat Pay APIs",
        status: TaskStatus::Canceled,
        label: TaskLabel::Feature,
        priority: TaskPriority::High,
        assignee: Some(3),
        due_in_days: None,
    },
    SampleTask {
        title: "Update the user manual",
        description: "Bring the user manual in line with the new release",
        status: TaskStatus::Todo,
        label: TaskLabel::Documentation,
        priority: TaskPriority::Low,
        assignee: Some(2),
        due_in_days: None,
    },
    SampleTask {
        title: "Implement data backups",
        description: "Back up the database to cloud storage on a schedule",
        status: TaskStatus::InProgress,
        label: TaskLabel::Feature,
        priority: TaskPriority::Critical,
        assignee: Some(1),
        due_in_days: None,
    },
];

/// Load the sample users and tasks
///
/// Does nothing when users already exist. Returns whether data was loaded.
pub async fn seed(state: &AppState) -> MockerResult<bool> {
    if state.users.count().await? > 0 {
        tracing::info!("users already present, skipping seed");
        return Ok(false);
    }

    let mut user_ids = Vec::with_capacity(USERS.len());
    for sample in USERS {
        let hashed = state.hash_password(sample.password.to_string()).await?;
        let user = User::new(
            UserCreate {
                first_name: sample.first_name.to_string(),
                last_name: sample.last_name.to_string(),
                username: sample.username.to_string(),
                email: format!("{}@example.com", sample.username),
                phone_number: Some(sample.phone_number.to_string()),
                status: sample.status,
                role: sample.role,
                password: String::new(),
            },
            hashed,
        );
        user_ids.push(state.users.create(user).await?.id);
    }
    tracing::info!(count = user_ids.len(), "seeded users");

    let now = Utc::now();
    for sample in TASKS {
        let task = Task::new(TaskCreate {
            title: sample.title.to_string(),
            description: Some(sample.description.to_string()),
            status: sample.status,
            label: sample.label,
            priority: sample.priority,
            due_date: sample.due_in_days.map(|days| now + Duration::days(days)),
            assignee: sample.assignee.and_then(|i| user_ids.get(i).cloned()),
        });
        state.tasks.create(task).await?;
    }
    tracing::info!(count = TASKS.len(), "seeded tasks");

    Ok(true)
}
