// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod login; // POST /api/auth/login - check credentials and get a token
pub mod register; // POST /api/auth/register - create an account and get a token

pub use login::login_post;
pub use register::register_post;

/*
AUTHENTICATION FLOW:

1. **Register**: POST /api/auth/register
   - Input: { "email": "string", "password": "string", "name": "string" }
   - 400 on missing fields, bad email shape, password under 6 characters,
     or an email that is already registered
   - Returns 201: { "user": {...}, "token": "eyJ..." }

2. **Login**: POST /api/auth/login
   - Input: { "email": "string", "password": "string" }
   - 400 on missing fields, 401 "Invalid credentials" for an unknown email
     and for a wrong password alike
   - Returns 200: { "user": {...}, "token": "eyJ..." }

The token goes into `Authorization: Bearer <token>` for protected routes.
It stays valid until it expires; there is no logout or revocation.
*/
