//! URL routing. Everything but `/login` sits behind the session guard.

use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::domain::a001_sector::ui::SectorsPage;
use crate::domain::a002_position::ui::PositionsPage;
use crate::domain::a003_stage::ui::StagesPage;
use crate::domain::a004_priority::ui::PrioritiesPage;
use crate::domain::a005_client::ui::ClientsPage;
use crate::domain::a006_employee::ui::EmployeesPage;
use crate::domain::a007_appointment::ui::AppointmentsCalendar;
use crate::layout::Shell;
use crate::reports::r001_appointment_report::AppointmentReportPage;
use crate::shared::config::HOME_ROUTE;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::account::AccountPage;
use crate::system::pages::login::LoginPage;

#[component]
fn ProtectedLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <Outlet />
            </Shell>
        </RequireAuth>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--not-found">
            <h1>"Página não encontrada"</h1>
            <a href=HOME_ROUTE>"Voltar para a agenda"</a>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/") view=|| view! { <Redirect path=HOME_ROUTE /> } />
                <ParentRoute path=path!("") view=ProtectedLayout>
                    <Route path=path!("/atendimentos") view=AppointmentsCalendar />
                    <Route path=path!("/clientes") view=ClientsPage />
                    <Route path=path!("/colaboradores") view=EmployeesPage />
                    <Route path=path!("/setores") view=SectorsPage />
                    <Route path=path!("/cargos") view=PositionsPage />
                    <Route path=path!("/etapas") view=StagesPage />
                    <Route path=path!("/prioridades") view=PrioritiesPage />
                    <Route path=path!("/relatorios/atendimentos") view=AppointmentReportPage />
                    <Route path=path!("/minha-conta") view=AccountPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
