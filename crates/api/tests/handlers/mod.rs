mod accounts_test;
mod activities_test;
mod middleware_test;
mod organizers_test;
mod reservations_test;
