use std::sync::{Arc, RwLock};

/// Who is currently logged in. There is exactly one of these per process;
/// the portal serves one browser at a time, matching the original's
/// in-memory auth flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Student { student_id: String, name: String },
    Admin,
}

/// Process-wide session cell with explicit transitions. Logging in as one
/// role clears the other; logout returns to anonymous.
#[derive(Clone, Default)]
pub struct SessionCell(Arc<RwLock<Session>>);

impl SessionCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login_student(&self, student_id: impl Into<String>, name: impl Into<String>) {
        *self.write() = Session::Student {
            student_id: student_id.into(),
            name: name.into(),
        };
    }

    pub fn login_admin(&self) {
        *self.write() = Session::Admin;
    }

    pub fn logout(&self) {
        *self.write() = Session::Anonymous;
    }

    pub fn current(&self) -> Session {
        self.read().clone()
    }

    pub fn is_admin(&self) -> bool {
        matches!(*self.read(), Session::Admin)
    }

    /// `(student_id, name)` of the logged-in student, if any.
    pub fn current_student(&self) -> Option<(String, String)> {
        match &*self.read() {
            Session::Student { student_id, name } => Some((student_id.clone(), name.clone())),
            _ => None,
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.0.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.0.write().unwrap_or_else(|e| e.into_inner())
    }
}
