use framestat::error::AppResult;

fn main() -> AppResult<()> {
    framestat::run()
}
