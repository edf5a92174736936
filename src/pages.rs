//! Login page served by the access gate.

const LOGIN_ERROR: &str = r#"<p class="error">Incorrect password, please try again.</p>"#;

/// Renders the password form. The form posts back to the current path.
pub fn login_page(has_error: bool) -> String {
    let error_message = if has_error { LOGIN_ERROR } else { "" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Authentication required</title>
    <style>
        body {{ display: flex; justify-content: center; align-items: center; height: 100vh; font-family: sans-serif; background-color: #f0f2f5; margin: 0; }}
        .login-box {{ background: white; padding: 40px; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.15); text-align: center; }}
        h2 {{ margin-top: 0; color: #333; }}
        input[type="password"] {{ padding: 10px; font-size: 16px; border-radius: 4px; border: 1px solid #ccc; width: 250px; }}
        input[type="submit"] {{ padding: 10px 20px; font-size: 16px; border-radius: 4px; border: none; background-color: #007bff; color: white; cursor: pointer; margin-top: 20px; }}
        input[type="submit"]:hover {{ background-color: #0056b3; }}
        .error {{ color: red; }}
    </style>
</head>
<body>
    <div class="login-box">
        <h2>Enter the access password</h2>
        <form method="post">
            <input type="password" name="password" autofocus>
            <br>
            <input type="submit" value="Enter">
        </form>
        {error_message}
    </div>
</body>
</html>
"#
    )
}
