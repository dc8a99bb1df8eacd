use super::principal::{Identity, Role};
use super::session::SessionState;

/// Views behind the login wall.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    PatientProfile,
    PatientAppointments,
    PatientReports,
    DoctorProfile,
    DoctorSchedule,
    DoctorPatients,
    DoctorPatientDetails(String),
}

impl Route {
    /// Role a route is reserved to; `None` means any signed-in user.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Dashboard => None,
            Route::PatientProfile | Route::PatientAppointments | Route::PatientReports => Some(Role::Patient),
            Route::DoctorProfile | Route::DoctorSchedule | Route::DoctorPatients | Route::DoctorPatientDetails(_) => Some(Role::Doctor),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".into(),
            Route::PatientProfile => "/patient/profile".into(),
            Route::PatientAppointments => "/patient/appointments".into(),
            Route::PatientReports => "/patient/reports".into(),
            Route::DoctorProfile => "/doctor/profile".into(),
            Route::DoctorSchedule => "/doctor/schedule".into(),
            Route::DoctorPatients => "/doctor/patients".into(),
            Route::DoctorPatientDetails(id) => format!("/doctor/patients/{}", id),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        match path {
            "/dashboard" => Some(Route::Dashboard),
            "/patient/profile" => Some(Route::PatientProfile),
            "/patient/appointments" => Some(Route::PatientAppointments),
            "/patient/reports" => Some(Route::PatientReports),
            "/doctor/profile" => Some(Route::DoctorProfile),
            "/doctor/schedule" => Some(Route::DoctorSchedule),
            "/doctor/patients" => Some(Route::DoctorPatients),
            _ => {
                let id = path.strip_prefix("/doctor/patients/")?;
                if id.is_empty() || id.contains('/') { return None; }
                Some(Route::DoctorPatientDetails(id.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Session still resolving; show a spinner.
    Pending,
    RedirectToLogin,
    Forbidden,
    Allowed(Identity),
}

pub fn check_route(state: &SessionState, route: &Route) -> RouteAccess {
    match state {
        SessionState::Uninitialized | SessionState::Resolving => RouteAccess::Pending,
        SessionState::Anonymous => RouteAccess::RedirectToLogin,
        SessionState::Authenticated(identity) => match route.required_role() {
            Some(role) if role != identity.role => RouteAccess::Forbidden,
            _ => RouteAccess::Allowed(identity.clone()),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub route: Route,
}

/// Sidebar entries for a role, in display order.
pub fn menu_for(role: Role) -> Vec<MenuItem> {
    let item = |title, route| MenuItem { title, route };
    match role {
        Role::Patient => vec![
            item("Dashboard", Route::Dashboard),
            item("My Profile", Route::PatientProfile),
            item("Appointments", Route::PatientAppointments),
            item("Medical Reports", Route::PatientReports),
        ],
        Role::Doctor => vec![
            item("Dashboard", Route::Dashboard),
            item("My Profile", Route::DoctorProfile),
            item("My Schedule", Route::DoctorSchedule),
            item("My Patients", Route::DoctorPatients),
        ],
    }
}
